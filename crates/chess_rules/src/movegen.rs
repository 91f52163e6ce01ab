//! Legal move generation.
//!
//! Both generators probe candidate (from, to) pairs through
//! `is_move_legal`, which never mutates the position, so the en-passant
//! target is untouched by rejected probes.

use tracing::warn;

use crate::board::Position;
use crate::rules::{is_king_in_check, is_move_legal, is_promotion};
use crate::types::*;

/// Generous fixed bound on generated moves; no legal chess position comes
/// close, so hitting it is logged and truncated rather than treated as fatal.
pub const MAX_MOVES: usize = 256;
pub const MAX_QUIESCENCE_MOVES: usize = 128;

/// All legal moves for `side`. Pawn moves reaching the last rank are emitted
/// as queen promotions.
pub fn legal_moves(pos: &Position, side: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for from in 0..64u8 {
        match pos.piece_at(from) {
            Some(pc) if pc.color == side => {}
            _ => continue,
        }
        for to in 0..64u8 {
            if !is_move_legal(pos, from, to, side) {
                continue;
            }
            if out.len() >= MAX_MOVES {
                warn!(side = ?side, "move buffer full; truncating generation");
                return out;
            }
            out.push(candidate(pos, from, to, side));
        }
    }
    out
}

/// Restricted generator for quiescence: captures, promotions, and en-passant
/// captures only. A side in check falls back to the full generator, since
/// every reply must resolve the check.
pub fn quiescence_moves(pos: &Position, side: Color) -> Vec<Move> {
    if is_king_in_check(pos, side) {
        return legal_moves(pos, side);
    }

    let mut out = Vec::with_capacity(16);
    for from in 0..64u8 {
        let pc = match pos.piece_at(from) {
            Some(pc) if pc.color == side => pc,
            _ => continue,
        };
        for to in 0..64u8 {
            let is_capture = matches!(pos.piece_at(to), Some(t) if t.color != side);
            let is_promo = is_promotion(pos, from, to, side);
            let is_ep = pc.kind == PieceKind::Pawn
                && pos.en_passant == Some(to)
                && pos.piece_at(to).is_none();
            if !(is_capture || is_promo || is_ep) {
                continue;
            }
            if !is_move_legal(pos, from, to, side) {
                continue;
            }
            if out.len() >= MAX_QUIESCENCE_MOVES {
                warn!(side = ?side, "quiescence buffer full; truncating generation");
                return out;
            }
            out.push(candidate(pos, from, to, side));
        }
    }
    out
}

fn candidate(pos: &Position, from: u8, to: u8, side: Color) -> Move {
    if is_promotion(pos, from, to, side) {
        Move::promoting(from, to, PieceKind::Queen)
    } else {
        Move::new(from, to)
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
