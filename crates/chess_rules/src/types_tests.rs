use super::*;

#[test]
fn test_coord_round_trip() {
    assert_eq!(coord_to_sq("a1"), Some(0));
    assert_eq!(coord_to_sq("h8"), Some(63));
    assert_eq!(coord_to_sq("e4"), Some(28));
    assert_eq!(sq_to_coord(28), "e4");
    assert_eq!(coord_to_sq("i1"), None);
    assert_eq!(coord_to_sq("a9"), None);
    assert_eq!(coord_to_sq("e"), None);
}

#[test]
fn test_square_helpers() {
    assert_eq!(sq(4, 0), Some(4)); // e1
    assert_eq!(sq(8, 0), None);
    assert_eq!(sq(-1, 3), None);
    assert_eq!(file_of(28), 4);
    assert_eq!(rank_of(28), 3);
}

#[test]
fn test_move_display() {
    assert_eq!(Move::new(12, 28).to_string(), "e2e4");
    let promo = Move::promoting(48, 56, PieceKind::Queen);
    assert_eq!(promo.to_string(), "a7a8q");
}
