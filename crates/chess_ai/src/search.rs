//! Alpha-beta minimax with quiescence, driven by iterative deepening under a
//! wall-clock budget.

use std::time::Duration;

use tracing::debug;

use chess_rules::{
    is_king_in_check, legal_moves, quiescence_moves, Color, Move, Position,
};

use crate::eval::{evaluate, MATE_SCORE};
use crate::limits::{SearchClock, SearchLimits};
use crate::ordering::{order_moves, KillerTable, MAX_SEARCH_PLY};

/// Plies of capture/promotion/evasion extension past the nominal horizon.
const QUIESCENCE_DEPTH: u8 = 4;

/// Budgets shorter than this trip the deep-iteration safety valve.
const SAFETY_VALVE_BUDGET: Duration = Duration::from_secs(10);
const SAFETY_VALVE_DEPTH: u8 = 7;

/// Outcome of one search invocation. `best_move` is `None` iff the side to
/// move had no legal move, a terminal game fact rather than an error.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub best_move: Option<Move>,
    /// Score of `best_move` from the searching side's perspective.
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u8,
    /// Nodes visited, quiescence included.
    pub nodes: u64,
}

/// Move selector owning the per-search state: the killer table, which
/// persists across iterative-deepening depths within one call and is reset
/// at the start of the next, and a node counter.
#[derive(Clone, Debug, Default)]
pub struct Searcher {
    killers: KillerTable,
    nodes: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks a move for `side` within `budget`. The budget is best-effort:
    /// nodes near the horizon honor it immediately, deeper ones finish first.
    pub fn select_move(&mut self, pos: &Position, side: Color, budget: Duration) -> SearchReport {
        self.search(pos, side, &SearchLimits::time(budget))
    }

    /// Iterative-deepening driver. Each depth re-orders the root moves
    /// (later depths by the previous iteration's scores), searches them with
    /// a full window, and adopts the depth's best move once the depth
    /// completes. A mid-depth timeout keeps the previous depth's answer.
    pub fn search(&mut self, pos: &Position, side: Color, limits: &SearchLimits) -> SearchReport {
        self.killers.clear();
        self.nodes = 0;

        let mut scratch = pos.clone();
        let mut root: Vec<(Move, i32)> = legal_moves(&scratch, side)
            .into_iter()
            .map(|mv| (mv, 0))
            .collect();
        if root.is_empty() {
            return SearchReport {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
            };
        }

        let clock = SearchClock::start(limits.budget);
        let max_depth = limits.max_depth.min(MAX_SEARCH_PLY as u8);

        let mut best_move = root[0].0;
        let mut best_score = 0;
        let mut completed_depth = 0u8;

        'deepening: for depth in 1..=max_depth {
            if depth == 1 {
                let mut moves: Vec<Move> = root.iter().map(|e| e.0).collect();
                order_moves(&scratch, &mut moves, &self.killers, 0);
                root = moves.into_iter().map(|mv| (mv, 0)).collect();
            } else {
                // Previous depth's scores bias the root ordering.
                root.sort_by_key(|&(_, score)| -score);
            }

            let mut iter_best = root[0].0;
            let mut iter_score = i32::MIN;

            for i in 0..root.len() {
                let mv = root[i].0;
                let undo = scratch.make_move(mv);
                let score = self.minimax(
                    &mut scratch,
                    depth - 1,
                    i32::MIN,
                    i32::MAX,
                    false,
                    side,
                    1,
                    &clock,
                );
                scratch.unmake_move(mv, undo);
                root[i].1 = score;

                if score > iter_score {
                    iter_score = score;
                    iter_best = mv;
                }
                if clock.expired() && i > 0 {
                    debug!(depth, "time budget exhausted mid-depth, keeping previous answer");
                    break 'deepening;
                }
            }

            best_move = iter_best;
            best_score = iter_score;
            completed_depth = depth;
            debug!(
                depth,
                best = %best_move,
                score = best_score,
                nodes = self.nodes,
                elapsed_ms = clock.elapsed().as_millis() as u64,
                "depth complete"
            );

            // A depth-adjusted mate score means deeper search cannot help.
            let mate_margin = MATE_SCORE - i32::from(depth) * 10;
            if best_score >= mate_margin || best_score <= -mate_margin {
                debug!(depth, "mate line found, stopping early");
                break;
            }
            if clock.expired() {
                debug!(depth, "time budget reached after completed depth");
                break;
            }
            if depth > SAFETY_VALVE_DEPTH
                && limits.budget.is_some_and(|b| b < SAFETY_VALVE_BUDGET)
            {
                debug!(depth, "safety valve for deep search on a short budget");
                break;
            }
        }

        SearchReport {
            best_move: Some(best_move),
            score: best_score,
            depth: completed_depth,
            nodes: self.nodes,
        }
    }

    /// Alpha-beta minimax. `maximizing` nodes move for `perspective`,
    /// minimizing nodes for the opponent. Quiet moves causing a cutoff are
    /// remembered as killers for `ply`.
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        perspective: Color,
        ply: usize,
        clock: &SearchClock,
    ) -> i32 {
        self.nodes += 1;

        // Cooperative cutoff: once over budget, nodes near the horizon bail
        // out with a static score instead of recursing.
        if clock.expired() && depth < 2 {
            return evaluate(pos, perspective);
        }
        if depth == 0 {
            return self.quiescence(pos, alpha, beta, maximizing, perspective, 0, ply);
        }

        let to_move = if maximizing {
            perspective
        } else {
            perspective.other()
        };

        let mut moves = legal_moves(pos, to_move);
        if moves.is_empty() {
            // Mate or stalemate; the evaluator folds the distinction in.
            return evaluate(pos, perspective);
        }
        order_moves(pos, &mut moves, &self.killers, ply);

        if maximizing {
            let mut best = i32::MIN;
            for mv in moves {
                let quiet = pos.piece_at(mv.to).is_none();
                let undo = pos.make_move(mv);
                let score = self.minimax(
                    pos,
                    depth - 1,
                    alpha,
                    beta,
                    false,
                    perspective,
                    ply + 1,
                    clock,
                );
                pos.unmake_move(mv, undo);

                if score > best {
                    best = score;
                }
                if score > alpha {
                    alpha = score;
                }
                if beta <= alpha {
                    if quiet {
                        self.killers.store(mv, ply);
                    }
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for mv in moves {
                let quiet = pos.piece_at(mv.to).is_none();
                let undo = pos.make_move(mv);
                let score = self.minimax(
                    pos,
                    depth - 1,
                    alpha,
                    beta,
                    true,
                    perspective,
                    ply + 1,
                    clock,
                );
                pos.unmake_move(mv, undo);

                if score < best {
                    best = score;
                }
                if score < beta {
                    beta = score;
                }
                if beta <= alpha {
                    if quiet {
                        self.killers.store(mv, ply);
                    }
                    break;
                }
            }
            best
        }
    }

    /// Capture/promotion/evasion extension past the horizon. Stand-pat
    /// bounds the window unless the side to move is in check, in which case
    /// every evasion is searched.
    #[allow(clippy::too_many_arguments)]
    fn quiescence(
        &mut self,
        pos: &mut Position,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        perspective: Color,
        qdepth: u8,
        ply: usize,
    ) -> i32 {
        self.nodes += 1;

        let stand_pat = evaluate(pos, perspective);
        if qdepth >= QUIESCENCE_DEPTH {
            return stand_pat;
        }

        let to_move = if maximizing {
            perspective
        } else {
            perspective.other()
        };
        let in_check = is_king_in_check(pos, to_move);

        if !in_check {
            if maximizing {
                if stand_pat >= beta {
                    return beta;
                }
                if stand_pat > alpha {
                    alpha = stand_pat;
                }
            } else {
                if stand_pat <= alpha {
                    return alpha;
                }
                if stand_pat < beta {
                    beta = stand_pat;
                }
            }
        }

        let mut moves = quiescence_moves(pos, to_move);
        if moves.is_empty() {
            return stand_pat;
        }
        order_moves(pos, &mut moves, &self.killers, ply + qdepth as usize);

        if maximizing {
            let mut best = if in_check { i32::MIN } else { stand_pat };
            for mv in moves {
                let undo = pos.make_move(mv);
                let score =
                    self.quiescence(pos, alpha, beta, false, perspective, qdepth + 1, ply);
                pos.unmake_move(mv, undo);

                if score > best {
                    best = score;
                }
                if score > alpha {
                    alpha = score;
                }
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = if in_check { i32::MAX } else { stand_pat };
            for mv in moves {
                let undo = pos.make_move(mv);
                let score =
                    self.quiescence(pos, alpha, beta, true, perspective, qdepth + 1, ply);
                pos.unmake_move(mv, undo);

                if score < best {
                    best = score;
                }
                if score < beta {
                    beta = score;
                }
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
