//! Command execution.
//!
//! Every command writes its human-readable output to the supplied writer so
//! the binary can hand in stdout and tests can hand in a buffer.

use std::io::Write;

use serde_json::Value as JsonValue;

use jsondb_driver::Driver;

use crate::args::Command;
use crate::records::{self, User};

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("Database error: {0}")]
    Db(#[from] jsondb_driver::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn execute(command: &Command, db: &Driver, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Demo => demo(db, out),
        Command::Write {
            collection,
            resource,
            json,
        } => {
            let value: JsonValue = serde_json::from_str(json)?;
            db.write(collection, resource, &value)?;
            writeln!(out, "Wrote {}/{}", collection, resource)?;
            Ok(())
        }
        Command::Read {
            collection,
            resource,
        } => {
            let value: JsonValue = db.read(collection, resource)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            Ok(())
        }
        Command::List { collection } => {
            for record in db.read_all(collection)? {
                write!(out, "{}", record)?;
            }
            Ok(())
        }
        Command::Delete {
            collection,
            resource,
        } => {
            db.delete(collection, resource)?;
            if resource.is_empty() {
                writeln!(out, "Deleted collection {}", collection)?;
            } else {
                writeln!(out, "Deleted {}/{}", collection, resource)?;
            }
            Ok(())
        }
    }
}

/// Walks the sample employees through every driver operation.
fn demo(db: &Driver, out: &mut impl Write) -> Result<(), CliError> {
    for user in records::employees() {
        db.write("users", &user.name, &user)?;
    }

    let raw = db.read_all("users")?;
    log::info!("Read {} raw records from users", raw.len());

    let mut all_users = Vec::with_capacity(raw.len());
    for record in &raw {
        match serde_json::from_str::<User>(record) {
            Ok(user) => all_users.push(user),
            Err(err) => writeln!(out, "Error unmarshalling record: {}", err)?,
        }
    }
    all_users.sort_by(|a, b| a.name.cmp(&b.name));
    let names: Vec<&str> = all_users.iter().map(|u| u.name.as_str()).collect();
    writeln!(out, "All users: {}", names.join(", "))?;

    db.delete("users", "Eve")?;
    writeln!(out, "User deleted successfully")?;

    let alice: User = db.read("users", "Alice")?;
    writeln!(out, "User read successfully: {} ({})", alice.name, alice.company)?;

    let mut updated = alice;
    updated.age = serde_json::Number::from(31u64);
    db.write("users", "Alice", &updated)?;
    writeln!(out, "User written successfully")?;

    Ok(())
}
