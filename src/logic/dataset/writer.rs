use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{PipelineError, Result};

/// Sibling path the content is staged in before the rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the full content to the staging sibling of `path`
///
/// Returns the staging path; on error the staging file is removed.
fn stage<F>(path: &Path, fill: F) -> Result<PathBuf>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PipelineError::io(parent, e))?;
    }

    let staging = staging_path(path);
    let result = File::create(&staging)
        .map_err(|e| PipelineError::io(&staging, e))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            fill(&mut writer)?;
            writer.flush().map_err(|e| PipelineError::io(&staging, e))?;
            writer
                .get_ref()
                .sync_all()
                .map_err(|e| PipelineError::io(&staging, e))
        });

    if let Err(e) = result {
        let _ = fs::remove_file(&staging);
        return Err(e);
    }
    Ok(staging)
}

/// Write through a staging file and rename into place, so a failed write
/// never leaves a partial artifact under the final name
fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let staging = stage(path, fill)?;
    fs::rename(&staging, path).map_err(|e| PipelineError::io(path, e))
}

fn fill_jsonl<T: Serialize>(path: &Path, records: &[T], writer: &mut BufWriter<File>) -> Result<()> {
    for record in records {
        let json = serde_json::to_string(record)?;
        writeln!(writer, "{}", json).map_err(|e| PipelineError::io(path, e))?;
    }
    Ok(())
}

fn fill_json<T: Serialize + ?Sized>(path: &Path, value: &T, writer: &mut BufWriter<File>) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer).map_err(|e| PipelineError::io(path, e))
}

/// One JSON object per line, in slice order
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    write_atomic(path, |writer| fill_jsonl(path, records, writer))?;

    log::debug!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON document
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    write_atomic(path, |writer| fill_json(path, value, writer))
}

// ============================================================================
// MULTI-FILE COMMIT
// ============================================================================

/// Several artifacts that become visible together
///
/// Every file is fully written to its staging sibling first; `commit` only
/// renames, in staging order. Dropping an uncommitted batch removes its
/// staging files and leaves the existing artifacts untouched.
#[derive(Debug, Default)]
pub struct StagedWrites {
    staged: Vec<(PathBuf, PathBuf)>,
}

impl StagedWrites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsonl<T: Serialize>(&mut self, path: &Path, records: &[T]) -> Result<()> {
        let staging = stage(path, |writer| fill_jsonl(path, records, writer))?;
        self.staged.push((staging, path.to_path_buf()));
        Ok(())
    }

    pub fn json<T: Serialize + ?Sized>(&mut self, path: &Path, value: &T) -> Result<()> {
        let staging = stage(path, |writer| fill_json(path, value, writer))?;
        self.staged.push((staging, path.to_path_buf()));
        Ok(())
    }

    /// Rename every staged file into place
    pub fn commit(mut self) -> Result<()> {
        let staged = std::mem::take(&mut self.staged);
        let mut pending = staged.into_iter();
        while let Some((staging, path)) = pending.next() {
            if let Err(e) = fs::rename(&staging, &path) {
                let _ = fs::remove_file(&staging);
                for (rest, _) in pending {
                    let _ = fs::remove_file(&rest);
                }
                return Err(PipelineError::io(path, e));
            }
            log::debug!("Committed {}", path.display());
        }
        Ok(())
    }
}

impl Drop for StagedWrites {
    fn drop(&mut self) {
        for (staging, _) in self.staged.drain(..) {
            let _ = fs::remove_file(&staging);
        }
    }
}
