//! Move ordering: MVV-LVA captures first, promotion bonuses, and a
//! per-ply killer-move memory for quiet cutoff moves.

use chess_rules::{Move, PieceKind, Position};

use crate::eval::piece_value;

/// Maximum search depth in plies; also bounds the killer table.
pub const MAX_SEARCH_PLY: usize = 30;

const KILLER_FIRST_BONUS: i32 = 10_000;
const KILLER_SECOND_BONUS: i32 = 5_000;

/// Two quiet cutoff moves remembered per ply. Entries persist across
/// iterative-deepening depths within one search and are cleared when a new
/// top-level search begins.
#[derive(Clone, Debug)]
pub struct KillerTable {
    slots: [[Option<Move>; 2]; MAX_SEARCH_PLY],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_SEARCH_PLY],
        }
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_SEARCH_PLY];
    }

    /// Records a quiet cutoff move, demoting the previous first killer.
    pub fn store(&mut self, mv: Move, ply: usize) {
        if ply >= MAX_SEARCH_PLY {
            return;
        }
        if self.slots[ply][0] != Some(mv) {
            self.slots[ply][1] = self.slots[ply][0];
            self.slots[ply][0] = Some(mv);
        }
    }

    fn bonus(&self, mv: Move, ply: usize) -> i32 {
        if ply >= MAX_SEARCH_PLY {
            return 0;
        }
        if self.slots[ply][0] == Some(mv) {
            KILLER_FIRST_BONUS
        } else if self.slots[ply][1] == Some(mv) {
            KILLER_SECOND_BONUS
        } else {
            0
        }
    }

    #[cfg(test)]
    fn slot(&self, ply: usize, i: usize) -> Option<Move> {
        self.slots[ply][i]
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// MVV-LVA plus promotion bonus. Kind ranks run Pawn=1 .. King=6, so a
/// higher-value victim taken by a lower-value attacker sorts first.
pub fn heuristic_score(pos: &Position, mv: Move) -> i32 {
    let mut score = 0;
    if let (Some(attacker), Some(victim)) = (pos.piece_at(mv.from), pos.piece_at(mv.to)) {
        score += 10 * (victim.kind.idx() as i32 + 1) - (attacker.kind.idx() as i32 + 1);
    }
    match mv.promo {
        Some(PieceKind::Queen) => score += piece_value(PieceKind::Queen),
        Some(PieceKind::Rook) => score += piece_value(PieceKind::Rook),
        _ => {}
    }
    score
}

/// Sorts `moves` best-first by heuristic score plus killer bonus for `ply`.
/// Applied at every search node, the root included.
pub fn order_moves(pos: &Position, moves: &mut [Move], killers: &KillerTable, ply: usize) {
    moves.sort_by_key(|&mv| -(heuristic_score(pos, mv) + killers.bonus(mv, ply)));
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
