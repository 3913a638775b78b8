//! CLI module for qachat.
//!
//! - Argument parsing
//! - The ask command, which streams one answer to stdout
//!
//! # Usage
//!
//! ```ignore
//! use qachat::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     Ok(CliCommand::Ask(options)) => { /* run_ask(...) */ }
//!     Ok(CliCommand::Version) => println!("{}", qachat::cli::version_line()),
//!     Ok(CliCommand::Help) => println!("{}", qachat::cli::USAGE),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

pub mod args;
pub mod ask;

pub use args::{parse_args, AskOptions, CliCommand, USAGE};
pub use ask::{exit_code, run_ask};

/// Crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What `--version` prints.
pub fn version_line() -> String {
    format!("qachat {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_line() {
        let line = version_line();
        assert!(line.starts_with("qachat "));
        assert!(VERSION.split('.').count() >= 2);
    }
}
