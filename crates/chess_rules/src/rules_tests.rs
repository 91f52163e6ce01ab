use super::*;

fn coord(c: &str) -> u8 {
    coord_to_sq(c).unwrap()
}

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

#[test]
fn test_square_attacked_patterns() {
    let pos = Position::new();
    // White knight on g1 attacks f3; nothing attacks e5 yet.
    assert!(is_square_attacked(&pos, coord("f3"), Color::White));
    assert!(!is_square_attacked(&pos, coord("e5"), Color::White));
    // Pawns attack diagonally, not straight ahead.
    assert!(is_square_attacked(&pos, coord("d3"), Color::White));
    assert!(!is_square_attacked(&pos, coord("e4"), Color::White));
    // Sliders need a clear path: the a1 rook is boxed in.
    assert!(!is_square_attacked(&pos, coord("a4"), Color::White));
}

#[test]
fn test_slider_attack_through_blocker() {
    let pos = fen("4k3/8/8/8/4r3/8/4P3/4K3 w - - 0 1");
    // The e4 rook's file attack stops at the e2 pawn.
    assert!(is_square_attacked(&pos, coord("e2"), Color::Black));
    assert!(!is_square_attacked(&pos, coord("e1"), Color::Black));
    assert!(is_square_attacked(&pos, coord("a4"), Color::Black));
}

#[test]
fn test_king_in_check() {
    let pos = fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    assert!(is_king_in_check(&pos, Color::White));
    assert!(!is_king_in_check(&pos, Color::Black));
}

#[test]
fn test_missing_king_reports_check() {
    // Corrupted state: no black king on the board.
    let pos = fen("8/8/8/8/8/8/8/4K3 w - - 0 1");
    assert!(is_king_in_check(&pos, Color::Black));
    assert!(!is_king_in_check(&pos, Color::White));
}

#[test]
fn test_basic_sanity_rejections() {
    let pos = Position::new();
    // Empty source square.
    assert!(!is_move_legal(&pos, coord("e4"), coord("e5"), Color::White));
    // Not our piece.
    assert!(!is_move_legal(&pos, coord("e7"), coord("e5"), Color::White));
    // Own piece on the destination.
    assert!(!is_move_legal(&pos, coord("a1"), coord("a2"), Color::White));
    // Null move.
    assert!(!is_move_legal(&pos, coord("e2"), coord("e2"), Color::White));
}

#[test]
fn test_pinned_piece_cannot_leave_the_line() {
    // The e2 rook is pinned to the king by the e4 rook.
    let pos = fen("4k3/8/8/8/4r3/8/4R3/4K3 w - - 0 1");
    assert!(is_move_legal(&pos, coord("e2"), coord("e3"), Color::White));
    assert!(is_move_legal(&pos, coord("e2"), coord("e4"), Color::White));
    assert!(!is_move_legal(&pos, coord("e2"), coord("d2"), Color::White));
    assert!(!is_move_legal(&pos, coord("e2"), coord("a2"), Color::White));
}

#[test]
fn test_king_cannot_step_into_attack() {
    let pos = fen("4k3/8/8/8/8/8/5r2/4K3 w - - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("f1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("d1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("f2"), Color::White));
}

#[test]
fn test_castling_legal_both_sides() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert!(is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));
    assert!(is_move_legal(&pos, coord("e8"), coord("g8"), Color::Black));
    assert!(is_move_legal(&pos, coord("e8"), coord("c8"), Color::Black));
}

#[test]
fn test_castling_rejected_when_king_has_moved() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    pos.apply_move(coord("e1"), coord("e2"), None);
    pos.apply_move(coord("e8"), coord("e7"), None);
    pos.apply_move(coord("e2"), coord("e1"), None);
    pos.apply_move(coord("e7"), coord("e8"), None);
    // Pieces are back home but the has-moved flags stick.
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(!is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));
}

#[test]
fn test_castling_rejected_when_rook_has_moved() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));
}

#[test]
fn test_castling_rejected_when_path_occupied() {
    let pos = Position::new();
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));

    // Queenside with only b1 occupied: the king's path is clear but the
    // rook's is not.
    let pos = fen("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));
}

#[test]
fn test_castling_rejected_out_of_or_through_check() {
    // Rook on f3 covers f1: kingside passes through an attacked square.
    let pos = fen("4k3/8/8/8/8/5r2/8/R3K2R w KQ - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));

    // Rook on e3 gives check: neither castle is available.
    let pos = fen("4k3/8/8/8/8/4r3/8/R3K2R w KQ - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(!is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));

    // Rook on g3 covers the landing square only.
    let pos = fen("4k3/8/8/8/8/6r1/8/R3K2R w KQ - 0 1");
    assert!(!is_move_legal(&pos, coord("e1"), coord("g1"), Color::White));
    assert!(is_move_legal(&pos, coord("e1"), coord("c1"), Color::White));
}

#[test]
fn test_en_passant_window_opens_and_closes() {
    let mut pos = Position::new();
    pos.apply_move(coord("e2"), coord("e4"), None);
    pos.apply_move(coord("a7"), coord("a6"), None);
    pos.apply_move(coord("e4"), coord("e5"), None);
    pos.apply_move(coord("d7"), coord("d5"), None);
    assert!(is_move_legal(&pos, coord("e5"), coord("d6"), Color::White));

    // Any intervening move resets the target.
    pos.apply_move(coord("h2"), coord("h3"), None);
    pos.apply_move(coord("h7"), coord("h6"), None);
    assert!(!is_move_legal(&pos, coord("e5"), coord("d6"), Color::White));
}

#[test]
fn test_probing_does_not_disturb_en_passant() {
    let mut pos = Position::new();
    pos.apply_move(coord("e2"), coord("e4"), None);
    pos.apply_move(coord("a7"), coord("a6"), None);
    pos.apply_move(coord("e4"), coord("e5"), None);
    pos.apply_move(coord("d7"), coord("d5"), None);
    let before = pos.clone();
    // Probe a mix of legal and illegal candidates.
    for from in 0..64u8 {
        for to in 0..64u8 {
            let _ = is_move_legal(&pos, from, to, Color::White);
        }
    }
    let _ = has_any_legal_moves(&pos, Color::White);
    assert_eq!(pos, before);
}

#[test]
fn test_has_any_legal_moves() {
    assert!(has_any_legal_moves(&Position::new(), Color::White));
    // Back-rank mate: black has nothing.
    let mated = fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
    assert!(!has_any_legal_moves(&mated, Color::Black));
    assert!(has_any_legal_moves(&mated, Color::White));
    // Stalemate: king trapped but not attacked.
    let stale = fen("k7/2Q5/8/8/8/8/8/K7 b - - 0 1");
    assert!(!has_any_legal_moves(&stale, Color::Black));
}

#[test]
fn test_insufficient_material() {
    assert!(is_draw_by_insufficient_material(&fen(
        "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
    )));
    assert!(is_draw_by_insufficient_material(&fen(
        "4k3/8/8/8/8/8/8/4KB2 w - - 0 1"
    )));
    assert!(is_draw_by_insufficient_material(&fen(
        "4k3/8/8/8/8/8/8/4KN2 w - - 0 1"
    )));
    // Same-colored bishops (c1 and f8 are both dark squares).
    assert!(is_draw_by_insufficient_material(&fen(
        "4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1"
    )));
    // Opposite-colored bishops (c1 dark, c8 light) can still mate.
    assert!(!is_draw_by_insufficient_material(&fen(
        "2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1"
    )));
    // Any pawn, rook, or queen keeps the game alive.
    assert!(!is_draw_by_insufficient_material(&fen(
        "4k3/7p/8/8/8/8/8/4KB2 w - - 0 1"
    )));
    assert!(!is_draw_by_insufficient_material(&fen(
        "4k3/8/8/8/8/8/8/R3K3 w - - 0 1"
    )));
    // Two minors on one side are not an automatic draw here.
    assert!(!is_draw_by_insufficient_material(&fen(
        "4k3/8/8/8/8/8/8/2N1KN2 w - - 0 1"
    )));
}
