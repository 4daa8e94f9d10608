//! Subcommand implementations.

pub mod common;
pub mod traits;

pub mod check;
pub mod info;
pub mod init;

pub use check::{run_check, CheckArgs};
pub use info::{print_info, run_info};
pub use init::{run_init, InitArgs};
