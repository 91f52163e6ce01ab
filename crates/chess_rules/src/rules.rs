//! Attack detection and full move legality.
//!
//! Legality is checked in two stages: a per-kind movement-pattern test, then
//! a simulation of the move on a scratch board to reject self-check. The
//! probed `Position` is never mutated.

use tracing::warn;

use crate::board::{promo_rank, Board, Position};
use crate::types::*;

/// True if any piece of `by` reaches `target` under its raw movement pattern.
pub fn is_square_attacked(pos: &Position, target: u8, by: Color) -> bool {
    board_square_attacked(&pos.board, target, by)
}

/// True if `color`'s king is attacked. A missing king is reported as "in
/// check" so a corrupted position stays terminal instead of crashing.
pub fn is_king_in_check(pos: &Position, color: Color) -> bool {
    board_king_in_check(&pos.board, color)
}

/// Full legality: sanity checks, movement pattern (castling preconditions
/// included), and a self-check simulation.
pub fn is_move_legal(pos: &Position, from: u8, to: u8, side: Color) -> bool {
    if from == to {
        return false;
    }
    let moving = match pos.piece_at(from) {
        Some(pc) if pc.color == side => pc,
        _ => return false,
    };
    if let Some(target) = pos.piece_at(to) {
        if target.color == side {
            return false;
        }
    }

    let pattern_ok = match moving.kind {
        PieceKind::Pawn => pawn_pattern(pos, from, to, side),
        PieceKind::Knight => knight_pattern(from, to),
        PieceKind::Bishop => {
            diagonal_line(from, to) && path_clear(&pos.board, from, to)
        }
        PieceKind::Rook => straight_line(from, to) && path_clear(&pos.board, from, to),
        PieceKind::Queen => {
            (straight_line(from, to) || diagonal_line(from, to))
                && path_clear(&pos.board, from, to)
        }
        PieceKind::King => king_pattern(pos, from, to, side, moving),
    };
    if !pattern_ok {
        return false;
    }

    // Simulate on a scratch board, including en-passant removal and the
    // castling rook hop, and reject if our own king ends up attacked.
    let mut sim = pos.board;
    if moving.kind == PieceKind::Pawn
        && file_of(to) != file_of(from)
        && sim[to as usize].is_none()
        && pos.en_passant == Some(to)
    {
        if let Some(victim_sq) = sq(file_of(to), rank_of(from)) {
            sim[victim_sq as usize] = None;
        }
    }
    let mut mover = moving;
    mover.has_moved = true;
    sim[from as usize] = None;
    sim[to as usize] = Some(mover);
    if moving.kind == PieceKind::King && (file_of(to) - file_of(from)).abs() == 2 {
        let rank = rank_of(from);
        let (rook_from_file, rook_to_file) = if file_of(to) > file_of(from) {
            (7, 5)
        } else {
            (0, 3)
        };
        if let (Some(rf), Some(rt)) = (sq(rook_from_file, rank), sq(rook_to_file, rank)) {
            sim[rt as usize] = sim[rf as usize];
            sim[rf as usize] = None;
        }
    }

    !board_king_in_check(&sim, side)
}

/// Short-circuiting scan over every own from-square against every to-square.
pub fn has_any_legal_moves(pos: &Position, side: Color) -> bool {
    for from in 0..64u8 {
        match pos.piece_at(from) {
            Some(pc) if pc.color == side => {}
            _ => continue,
        }
        for to in 0..64u8 {
            if is_move_legal(pos, from, to, side) {
                return true;
            }
        }
    }
    false
}

/// Automatic draw detection: K vs K, K+minor vs K, and K+B vs K+B with both
/// bishops on same-colored squares. Any pawn, rook, or queen disqualifies.
pub fn is_draw_by_insufficient_material(pos: &Position) -> bool {
    #[derive(Default)]
    struct Counts {
        knights: u32,
        bishops: u32,
        bishops_light: u32,
        bishops_dark: u32,
        majors_or_pawns: u32,
    }
    let mut white = Counts::default();
    let mut black = Counts::default();

    for s in 0..64u8 {
        let pc = match pos.piece_at(s) {
            Some(pc) => pc,
            None => continue,
        };
        let side = match pc.color {
            Color::White => &mut white,
            Color::Black => &mut black,
        };
        match pc.kind {
            PieceKind::King => {}
            PieceKind::Knight => side.knights += 1,
            PieceKind::Bishop => {
                side.bishops += 1;
                if (rank_of(s) + file_of(s)) % 2 != 0 {
                    side.bishops_light += 1;
                } else {
                    side.bishops_dark += 1;
                }
            }
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => side.majors_or_pawns += 1,
        }
    }

    if white.majors_or_pawns > 0 || black.majors_or_pawns > 0 {
        return false;
    }

    let white_minors = white.knights + white.bishops;
    let black_minors = black.knights + black.bishops;

    // K vs K, or a lone minor against a bare king.
    if white_minors + black_minors <= 1 {
        return true;
    }
    // K+B vs K+B with bishops on same-colored squares.
    if white.knights == 0
        && black.knights == 0
        && white.bishops == 1
        && black.bishops == 1
        && (white.bishops_light == black.bishops_light)
    {
        return true;
    }
    false
}

pub(crate) fn board_king_in_check(board: &Board, color: Color) -> bool {
    let mut king = None;
    for s in 0..64u8 {
        if let Some(pc) = board[s as usize] {
            if pc.color == color && pc.kind == PieceKind::King {
                king = Some(s);
                break;
            }
        }
    }
    let king = match king {
        Some(s) => s,
        None => {
            warn!(?color, "king missing from board; treating as in check");
            return true;
        }
    };
    board_square_attacked(board, king, color.other())
}

pub(crate) fn board_square_attacked(board: &Board, target: u8, by: Color) -> bool {
    let (tf, tr) = (file_of(target), rank_of(target));
    for from in 0..64u8 {
        let pc = match board[from as usize] {
            Some(pc) if pc.color == by => pc,
            _ => continue,
        };
        let (ff, fr) = (file_of(from), rank_of(from));
        let (df, dr) = (tf - ff, tr - fr);
        let hit = match pc.kind {
            PieceKind::Pawn => {
                // Attack geometry only; forward moves do not threaten.
                let dir: i8 = match by {
                    Color::White => 1,
                    Color::Black => -1,
                };
                dr == dir && df.abs() == 1
            }
            PieceKind::Knight => {
                (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
            }
            PieceKind::Bishop => df.abs() == dr.abs() && path_clear(board, from, target),
            PieceKind::Rook => (df == 0 || dr == 0) && path_clear(board, from, target),
            PieceKind::Queen => {
                (df == 0 || dr == 0 || df.abs() == dr.abs()) && path_clear(board, from, target)
            }
            PieceKind::King => df.abs() <= 1 && dr.abs() <= 1 && (df != 0 || dr != 0),
        };
        if hit {
            return true;
        }
    }
    false
}

/// Intervening squares between `from` and `to` (exclusive) are all empty.
/// `from` and `to` must share a rank, file, or diagonal.
fn path_clear(board: &Board, from: u8, to: u8) -> bool {
    let df = (file_of(to) - file_of(from)).signum();
    let dr = (rank_of(to) - rank_of(from)).signum();
    let mut f = file_of(from) + df;
    let mut r = rank_of(from) + dr;
    while (f, r) != (file_of(to), rank_of(to)) {
        match sq(f, r) {
            Some(s) => {
                if board[s as usize].is_some() {
                    return false;
                }
            }
            None => return false,
        }
        f += df;
        r += dr;
    }
    true
}

fn straight_line(from: u8, to: u8) -> bool {
    file_of(from) == file_of(to) || rank_of(from) == rank_of(to)
}

fn diagonal_line(from: u8, to: u8) -> bool {
    (file_of(to) - file_of(from)).abs() == (rank_of(to) - rank_of(from)).abs()
}

fn knight_pattern(from: u8, to: u8) -> bool {
    let df = (file_of(to) - file_of(from)).abs();
    let dr = (rank_of(to) - rank_of(from)).abs();
    (df == 1 && dr == 2) || (df == 2 && dr == 1)
}

fn pawn_pattern(pos: &Position, from: u8, to: u8, side: Color) -> bool {
    let (dir, start_rank, ep_rank) = match side {
        Color::White => (1, 1, 4),
        Color::Black => (-1, 6, 3),
    };
    let df = file_of(to) - file_of(from);
    let dr = rank_of(to) - rank_of(from);

    // Single push.
    if df == 0 && dr == dir && pos.piece_at(to).is_none() {
        return true;
    }
    // Double push from the start rank through an empty square.
    if df == 0 && dr == 2 * dir && rank_of(from) == start_rank && pos.piece_at(to).is_none() {
        if let Some(mid) = sq(file_of(from), rank_of(from) + dir) {
            return pos.piece_at(mid).is_none();
        }
    }
    if df.abs() == 1 && dr == dir {
        // Ordinary diagonal capture.
        if let Some(target) = pos.piece_at(to) {
            return target.color != side;
        }
        // En passant: diagonal onto the empty target square, mover on the
        // rank a double-pushed enemy pawn just landed beside.
        if pos.en_passant == Some(to) && rank_of(from) == ep_rank {
            return true;
        }
    }
    false
}

fn king_pattern(pos: &Position, from: u8, to: u8, side: Color, king: Piece) -> bool {
    let df = file_of(to) - file_of(from);
    let dr = rank_of(to) - rank_of(from);

    if df.abs() <= 1 && dr.abs() <= 1 {
        return true;
    }

    // Castling: king slides two files along its home rank.
    if king.has_moved || dr != 0 || df.abs() != 2 {
        return false;
    }
    let home_rank: i8 = match side {
        Color::White => 0,
        Color::Black => 7,
    };
    if rank_of(from) != home_rank || file_of(from) != 4 {
        return false;
    }

    let (rook_file, between_files, pass_files): (i8, &[i8], &[i8]) = if df > 0 {
        (7, &[5, 6], &[4, 5, 6])
    } else {
        (0, &[1, 2, 3], &[4, 3, 2])
    };

    let rook_sq = match sq(rook_file, home_rank) {
        Some(s) => s,
        None => return false,
    };
    match pos.piece_at(rook_sq) {
        Some(rook) if rook.kind == PieceKind::Rook && rook.color == side && !rook.has_moved => {}
        _ => return false,
    }
    for &f in between_files {
        match sq(f, home_rank) {
            Some(s) if pos.piece_at(s).is_none() => {}
            _ => return false,
        }
    }
    // Not out of, through, or into check.
    let enemy = side.other();
    for &f in pass_files {
        match sq(f, home_rank) {
            Some(s) if !is_square_attacked(pos, s, enemy) => {}
            _ => return false,
        }
    }
    true
}

// Promotion detection shared with the generator.
pub(crate) fn is_promotion(pos: &Position, from: u8, to: u8, side: Color) -> bool {
    matches!(pos.piece_at(from), Some(pc) if pc.kind == PieceKind::Pawn)
        && rank_of(to) == promo_rank(side)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
