pub mod classify;
pub mod commands;
pub mod serve;

pub use commands::{Cli, Commands};
