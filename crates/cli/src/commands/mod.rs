pub mod catalog;
pub mod config;
pub mod doctor;
pub mod quote;

use std::path::PathBuf;

use cotiza_core::config::{AppConfig, ConfigOverrides, LoadOptions};
use cotiza_core::Catalog;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    fn json<T: Serialize>(command: &str, value: &T) -> Self {
        match serde_json::to_string_pretty(value) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), 1),
        }
    }
}

/// Loads config and the inventory it points to. Unlike the server, the CLI
/// reports an unreadable inventory instead of quoting against an empty one.
fn load_catalog(command: &str, catalog_path: Option<PathBuf>) -> Result<Catalog, CommandResult> {
    let options = LoadOptions {
        overrides: ConfigOverrides { catalog_path, ..ConfigOverrides::default() },
        ..LoadOptions::default()
    };
    let config = AppConfig::load(options)
        .map_err(|error| CommandResult::failure(command, "config_validation", error.to_string(), 2))?;

    Catalog::load_path(&config.catalog.path)
        .map_err(|error| CommandResult::failure(command, "catalog_load", error.to_string(), 3))
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
