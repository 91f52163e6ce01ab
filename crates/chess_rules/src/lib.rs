pub mod board;
pub mod movegen;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export core game logic
pub use board::*;
pub use movegen::*;
pub use perft::perft;
pub use rules::*;
pub use types::*;
