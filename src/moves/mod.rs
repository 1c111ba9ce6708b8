pub mod execute;
pub mod magic;
pub mod movegen;
pub mod perft;
pub mod square_control;
pub mod tables;
pub mod types;
pub mod uci;

pub use execute::{play, undo};
pub use movegen::generate_legal_moves;
pub use types::{Move, MoveFlag, MoveList};
pub use uci::{format_move, parse_move};
