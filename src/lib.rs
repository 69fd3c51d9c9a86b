// Library surface for headless/integration tests and reuse.
// The binary only adds argument parsing and terminal bootstrap.
pub mod app_dirs;
pub mod attempt;
pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod keys;
pub mod logging;
pub mod orbs;
pub mod session;
pub mod terminal;
pub mod util;

pub use error::GameError;
