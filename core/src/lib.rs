pub mod board;
pub mod move_gen;
pub mod perft;
pub mod types;

pub use board::*;
pub use move_gen::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use types::*;
