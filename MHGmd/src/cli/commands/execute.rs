//! Command execution implementations

use super::Commands;
use super::gmd;
use crate::formats::gmd::{ExportOptions, ImportMode};

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Info { path, json } => gmd::info(path, *json),
            Commands::List { path, limit } => gmd::list(path, *limit),
            Commands::Get { path, index } => gmd::get(path, *index),
            Commands::Set { path, index, text } => gmd::set(path, *index, text),
            Commands::Search {
                path,
                query,
                name,
                limit,
            } => gmd::search(path, query, *name, *limit),
            Commands::Replace {
                path,
                find,
                replace_with,
                case_sensitive,
                dry_run,
            } => gmd::replace(path, find, replace_with, *case_sensitive, *dry_run),
            Commands::Export {
                path,
                output,
                id,
                name,
            } => gmd::export(
                path,
                output.as_deref(),
                ExportOptions {
                    include_id: *id,
                    include_name: *name,
                },
            ),
            Commands::Import {
                path,
                records,
                by_name,
                backup,
            } => gmd::import(
                path,
                records,
                if *by_name {
                    ImportMode::ByName
                } else {
                    ImportMode::Positional
                },
                *backup,
            ),
            Commands::Merge {
                path,
                source,
                output,
            } => gmd::merge(path, source, output.as_deref()),
        }
    }
}
