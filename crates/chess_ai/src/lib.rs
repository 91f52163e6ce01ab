//! Time-bounded adversarial search for the chess rules engine.
//!
//! Alpha-beta minimax with a quiescence extension, MVV-LVA plus killer-move
//! ordering, and an iterative-deepening driver under a wall-clock budget.

pub mod eval;
pub mod limits;
pub mod ordering;
pub mod search;

pub use eval::{evaluate, MATE_SCORE};
pub use limits::{SearchClock, SearchLimits};
pub use ordering::{order_moves, KillerTable, MAX_SEARCH_PLY};
pub use search::{SearchReport, Searcher};
