//! Schema validation of outline files.
//!
//! Wraps the JSON Schema engine behind a file-set partitioning interface:
//! given filenames and a schema, return which files are valid and which are
//! not, with per-file error records. Schema violations are data, not
//! exceptions — only a broken schema (or a non-object one) is a hard error.
//!
//! A file that cannot be read, parses to nothing, or fails to parse at all
//! is recorded as invalid with a synthetic error record; processing always
//! continues with the remaining files. Given the same filesystem content and
//! schema, output is fully deterministic and preserves input order.

use crate::types::{ErrorRecord, InvalidFile};
use jsonschema::{Draft, Validator};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The outline schema shipped with the binary, used when no `--schema`
/// override is given.
pub const DEFAULT_SCHEMA: &str = include_str!("../schema/outline.schema.json");

#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema error: {0}")]
    Schema(String),
}

/// Partition of a file set into valid and invalid files, input order
/// preserved in both collections.
#[derive(Debug, Default)]
pub struct Validation {
    pub valid_files: Vec<PathBuf>,
    pub invalid_files: Vec<InvalidFile>,
}

/// Load the schema document: either the embedded default or an override
/// file from disk.
pub fn load_schema(path: Option<&Path>) -> Result<serde_json::Value, ValidateError> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_SCHEMA.to_string(),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Validate each file against the schema, partitioning into valid and
/// invalid. Read and parse failures become per-file error records; no file
/// aborts processing of the rest.
pub fn validate_files(
    files: &[PathBuf],
    schema: &serde_json::Value,
) -> Result<Validation, ValidateError> {
    if !schema.is_object() {
        return Err(ValidateError::Schema(
            "schema must be a JSON object".to_string(),
        ));
    }
    let validator = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(schema)
        .map_err(|err| ValidateError::Schema(err.to_string()))?;

    let mut validation = Validation::default();
    for file in files {
        let errors = file_errors(file, &validator);
        if errors.is_empty() {
            validation.valid_files.push(file.clone());
        } else {
            validation.invalid_files.push(InvalidFile {
                file: file.clone(),
                errors,
            });
        }
    }
    Ok(validation)
}

fn empty_file_record(file: &Path) -> ErrorRecord {
    ErrorRecord::message_only(format!(
        "file {} is empty or cannot be read",
        file.display()
    ))
}

fn file_errors(file: &Path, validator: &Validator) -> Vec<ErrorRecord> {
    let content = match fs::read_to_string(file) {
        Ok(content) => content,
        Err(err) => return vec![ErrorRecord::message_only(err.to_string())],
    };
    if content.trim().is_empty() {
        return vec![empty_file_record(file)];
    }
    let parsed: serde_yaml::Value = match serde_yaml::from_str(&content) {
        Ok(parsed) => parsed,
        Err(err) => return vec![ErrorRecord::message_only(err.to_string())],
    };
    if parsed.is_null() {
        return vec![empty_file_record(file)];
    }
    let document = match serde_json::to_value(&parsed) {
        Ok(document) => document,
        Err(err) => return vec![ErrorRecord::message_only(err.to_string())],
    };
    validator
        .iter_errors(&document)
        .map(|err| ErrorRecord {
            message: err.to_string(),
            instance_path: Some(err.instance_path.to_string()),
            schema_path: Some(err.schema_path.to_string()),
        })
        .collect()
}
