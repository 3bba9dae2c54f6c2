//! Subcommands and their execution against a store.

use crate::config::Config;
use crate::error::{CliError, Result};
use clap::Subcommand;
use serde_json::Value;
use shelf_engine::{
    entity::name_for_key, FileStorage, IdArg, JsonFields, LocalStore, Response, Storage,
};

/// Untyped store driven by the CLI.
pub type CliStore<S> = LocalStore<JsonFields, S>;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the whole collection
    List,
    /// Print one record by id
    Get {
        /// Record id, as a number or numeric string
        id: Option<String>,
    },
    /// Add a record from a JSON object; any "id" is ignored
    Add {
        /// JSON object of record fields
        record: String,
    },
    /// Replace the record named by the JSON object's "id"
    Update {
        /// JSON object including "id"
        record: String,
    },
    /// Delete a record by id
    Delete {
        /// Record id, as a number or numeric string
        id: Option<String>,
    },
}

/// Open the file-backed store described by `config`.
pub fn open_store(config: &Config) -> Result<CliStore<FileStorage>> {
    let storage = FileStorage::open(&config.data_dir)?;
    Ok(LocalStore::new(storage, config.entity.clone()).with_entity(name_for_key(&config.entity)))
}

/// Run one command.
///
/// Refusals (missing or unknown ids) come back as an error [`Response`];
/// fatal engine errors and bad input are returned as [`CliError`].
pub fn execute<S: Storage>(
    store: &mut CliStore<S>,
    command: &Command,
) -> Result<Response<JsonFields>> {
    let response = match command {
        Command::List => Response::from(settle(store.load_all())?),
        Command::Get { id } => Response::from(settle(store.get_by_id(id.clone()))?),
        Command::Add { record } => Response::from(settle(store.add(parse_fields(record)?))?),
        Command::Update { record } => {
            let fields = parse_fields(record)?;
            let id = IdArg::from_json(fields.get("id").unwrap_or(&Value::Null));
            Response::from(settle(store.update_by(id, fields))?)
        }
        Command::Delete { id } => Response::from(settle(store.delete(id.clone()))?),
    };

    if let Response::Error { error } = &response {
        tracing::info!(key = store.key(), %error, "request refused");
    }
    Ok(response)
}

/// Split fatal engine errors off from ordinary refusals.
fn settle<T>(result: shelf_engine::error::Result<T>) -> Result<shelf_engine::error::Result<T>> {
    match result {
        Err(e) if e.is_fatal() => Err(e.into()),
        other => Ok(other),
    }
}

fn parse_fields(text: &str) -> Result<JsonFields> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(CliError::InvalidJson("expected a JSON object".to_string())),
        Err(e) => Err(CliError::InvalidJson(e.to_string())),
    }
}
