use std::path::PathBuf;

use cotiza_core::ProductRecord;

use crate::commands::{load_catalog, CommandResult};

pub fn run(catalog_path: Option<PathBuf>) -> CommandResult {
    match load_catalog("catalog", catalog_path) {
        Ok(catalog) => {
            let listing: Vec<&ProductRecord> = catalog.iter().collect();
            CommandResult::json("catalog", &listing)
        }
        Err(failure) => failure,
    }
}
