use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use crate::{Result, ScrubError};

/// Staged write for the temp-file-then-rename contract: the source bytes
/// are copied to a temp file in the target's directory, the sanitizer
/// works on that copy, and `commit` atomically renames it over the
/// target. Dropping a `StagedWrite` (or calling `abort`) deletes the temp
/// file and leaves the target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    pub fn begin(source: &Path, target: &Path) -> Result<Self> {
        // Same directory as the target so the final rename cannot cross
        // filesystems.
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let suffix = target
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e));

        let mut builder = tempfile::Builder::new();
        builder.prefix(".tagwipe-");
        if let Some(suffix) = suffix.as_deref() {
            builder.suffix(suffix);
        }

        let temp = builder
            .tempfile_in(dir)
            .map_err(|e| ScrubError::Write(format!("{}: {}", dir.display(), e)))?;

        std::fs::copy(source, temp.path())
            .map_err(|e| ScrubError::Write(format!("{}: {}", temp.path().display(), e)))?;

        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Flushes the staged file to disk and renames it over the target.
    /// On failure the temp file is cleaned up and the target is intact.
    pub fn commit(self) -> Result<()> {
        self.temp
            .as_file()
            .sync_all()
            .map_err(|e| ScrubError::Write(format!("{}: {}", self.target.display(), e)))?;

        self.temp
            .persist(&self.target)
            .map_err(|e| ScrubError::Write(format!("{}: {}", self.target.display(), e.error)))?;

        log::debug!("committed staged write to {}", self.target.display());
        Ok(())
    }

    /// Discards the staged copy without touching the target.
    pub fn abort(self) {
        // NamedTempFile removes itself on drop.
    }
}
