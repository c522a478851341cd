//! One module per subcommand, each exposing an `execute` function.

pub mod list;
pub mod remove;
pub mod run;
pub mod show;
pub mod store;
