//! # jsondb-cli
//!
//! Command-line front end for the jsondb document store.
//!
//! ## Usage
//!
//! ```bash
//! jsondb --root ./db write users alice '{"name": "Alice", "age": "30"}'
//! jsondb --root ./db read users alice
//! jsondb --root ./db list users
//! jsondb --root ./db delete users alice
//! jsondb --root ./db demo
//! ```

pub mod args;
pub mod commands;
pub mod records;

pub use args::{Args, Command};
pub use commands::{execute, CliError};

use jsondb_driver::{Driver, LogFacade, Options};

/// Opens the database named by `args` and runs its command against stdout.
pub fn run(args: &Args) -> Result<(), CliError> {
    let db = Driver::new(args.root_dir(), Options::new().with_logger(LogFacade))?;
    let stdout = std::io::stdout();
    execute(&args.command, &db, &mut stdout.lock())
}
