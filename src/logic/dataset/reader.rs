use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};

/// Fail with MissingInput unless `path` is an existing file
pub fn require_input(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(PipelineError::MissingInput {
            path: path.to_path_buf(),
        })
    }
}

/// Read a JSON Lines table; blank lines are skipped
///
/// A line that does not parse into `T` (missing field, wrong type) is a
/// SchemaMismatch naming the file and line number.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    require_input(path)?;

    let file = File::open(path).map_err(|e| PipelineError::io(path, e))?;
    let mut records = Vec::new();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| PipelineError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| {
            PipelineError::schema(format!("{}:{}", path.display(), index + 1), e.to_string())
        })?;
        records.push(record);
    }

    Ok(records)
}

/// Read a whole-file JSON document
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    require_input(path)?;

    let data = fs::read(path).map_err(|e| PipelineError::io(path, e))?;
    serde_json::from_slice(&data)
        .map_err(|e| PipelineError::schema(path.display().to_string(), e.to_string()))
}
