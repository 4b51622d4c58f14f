pub mod commands;
pub mod predict;
pub mod serve;

pub use commands::{Cli, Commands};
