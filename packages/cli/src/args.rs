use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// jsondb - a file-backed JSON document store
#[derive(Parser, Debug)]
#[command(name = "jsondb")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Root directory of the database
    #[arg(long, env = "JSONDB_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write, list, read and delete a sample set of users
    Demo,

    /// Create or replace a resource with a JSON literal
    Write {
        collection: String,
        resource: String,
        json: String,
    },

    /// Print a single resource
    Read { collection: String, resource: String },

    /// Print every resource in a collection
    List { collection: String },

    /// Delete a resource, or the whole collection when no resource is given
    Delete {
        collection: String,
        #[arg(default_value = "")]
        resource: String,
    },
}

impl Args {
    /// `--root`, then `$JSONDB_ROOT`, then `<data dir>/jsondb`, then `./jsondb`.
    pub fn root_dir(&self) -> PathBuf {
        self.root.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("jsondb"))
                .unwrap_or_else(|| PathBuf::from("jsondb"))
        })
    }
}
