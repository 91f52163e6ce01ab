//! Static evaluation: material plus piece-square tables, with terminal
//! checkmate/stalemate detection folded in.

use chess_rules::{
    file_of, has_any_legal_moves, is_king_in_check, rank_of, Color, PieceKind, Position,
};

/// Returned for a checkmated (negative) or mating (positive) perspective.
pub const MATE_SCORE: i32 = 20_000;

/// Material values in centipawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King (kings are never counted).
pub const PIECE_VALUES: [i32; 6] = [100, 320, 330, 500, 900, 0];

pub fn piece_value(kind: PieceKind) -> i32 {
    PIECE_VALUES[kind.idx()]
}

type Pst = [[i32; 8]; 8];

// Piece-square tables from White's point of view, indexed [rank][file] with
// rank 0 = White's back rank. Black reads them mirrored vertically.
#[rustfmt::skip]
const PAWN_PST: Pst = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,  10,  10, -20, -20,  10,  10,   5],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const KNIGHT_PST: Pst = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

#[rustfmt::skip]
const BISHOP_PST: Pst = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10,   5,   0,   0,   0,   0,   5, -10],
    [-10,  10,  10,  10,  10,  10,  10, -10],
    [-10,   0,  10,  10,  10,  10,   0, -10],
    [-10,   5,   5,  10,  10,   5,   5, -10],
    [-10,   0,   5,  10,  10,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

#[rustfmt::skip]
const ROOK_PST: Pst = [
    [  0,   0,   0,   5,   5,   0,   0,   0],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [ -5,   0,   0,   0,   0,   0,   0,  -5],
    [  5,  10,  10,  10,  10,  10,  10,   5],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
const QUEEN_PST: Pst = [
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
    [-10,   0,   5,   0,   0,   0,   0, -10],
    [-10,   5,   5,   5,   5,   5,   0, -10],
    [  0,   0,   5,   5,   5,   5,   0,  -5],
    [ -5,   0,   5,   5,   5,   5,   0,  -5],
    [-10,   0,   5,   5,   5,   5,   0, -10],
    [-10,   0,   0,   0,   0,   0,   0, -10],
    [-20, -10, -10,  -5,  -5, -10, -10, -20],
];

#[rustfmt::skip]
const KING_PST: Pst = [
    [ 20,  30,  10,   0,   0,  10,  30,  20],
    [ 20,  20,   0,   0,   0,   0,  20,  20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
];

fn pst(kind: PieceKind) -> &'static Pst {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King => &KING_PST,
    }
}

/// Scores the position from `perspective`'s point of view in centipawns.
///
/// Terminal conditions override the heuristic score: no legal move for the
/// perspective side is mate (`-MATE_SCORE`) or stalemate (0); an opponent
/// with no moves while in check means the perspective side has mated
/// (`+MATE_SCORE`).
pub fn evaluate(pos: &Position, perspective: Color) -> i32 {
    let mut material = 0i32;
    let mut positional = 0i32;

    for s in 0..64u8 {
        let pc = match pos.piece_at(s) {
            Some(pc) => pc,
            None => continue,
        };
        let table_rank = match pc.color {
            Color::White => rank_of(s),
            Color::Black => 7 - rank_of(s),
        };
        let pst_val = pst(pc.kind)[table_rank as usize][file_of(s) as usize];
        if pc.color == perspective {
            material += piece_value(pc.kind);
            positional += pst_val;
        } else {
            material -= piece_value(pc.kind);
            positional -= pst_val;
        }
    }

    if !has_any_legal_moves(pos, perspective) {
        return if is_king_in_check(pos, perspective) {
            -MATE_SCORE
        } else {
            0
        };
    }
    let opponent = perspective.other();
    if !has_any_legal_moves(pos, opponent) && is_king_in_check(pos, opponent) {
        return MATE_SCORE;
    }

    material + positional
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
