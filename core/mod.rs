// Core module: Command model and protocol selection (NO I/O dependencies)
pub mod types;
pub mod command;

pub use types::*;
pub use command::*;
