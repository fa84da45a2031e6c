use std::fmt;
use std::path::{Path, PathBuf};
use serde::Serialize;

pub mod audio;
pub mod cli;
pub mod utils;

/// Container formats this tool knows how to sanitize. Anything else the
/// probe detects is rejected as unsupported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Flac,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AudioFile {
    pub path: PathBuf,
    pub file_name: String,
    pub format: AudioFormat,
    pub size_bytes: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum ScrubError {
    #[error("unreadable input: {0}")]
    Unreadable(String),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("metadata parse error: {0}")]
    MetadataParse(String),
    #[error("write error: {0}")]
    Write(String),
    #[error("invalid arguments: {0}")]
    Usage(String),
}

impl ScrubError {
    /// Exit-code class: input-side failures are 1, write failures and
    /// usage errors are 2.
    pub fn exit_class(&self) -> u8 {
        match self {
            ScrubError::Unreadable(_)
            | ScrubError::UnsupportedFormat(_)
            | ScrubError::MetadataParse(_) => 1,
            ScrubError::Write(_) | ScrubError::Usage(_) => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrubError>;

/// Per-file outcome, consumed by the Logger.
#[derive(Debug, Clone, Serialize)]
pub struct SanitizationResult {
    pub path: PathBuf,
    pub format: Option<AudioFormat>,
    pub removed: Vec<String>,
    pub error: Option<String>,
    pub exit_class: u8,
}

impl SanitizationResult {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

/// Runs the whole pipeline for one input file: resolve, stage a copy,
/// sanitize the copy, commit. Errors are folded into the returned result
/// so a batch run can keep going.
pub fn sanitize_file(
    input: &Path,
    output: Option<&Path>,
    policy: &audio::sanitizer::KeepPolicy,
) -> SanitizationResult {
    let mut format = None;
    match run_pipeline(input, output, policy, &mut format) {
        Ok(removed) => SanitizationResult {
            path: input.to_path_buf(),
            format,
            removed,
            error: None,
            exit_class: 0,
        },
        Err(e) => SanitizationResult {
            path: input.to_path_buf(),
            format,
            removed: Vec::new(),
            exit_class: e.exit_class(),
            error: Some(e.to_string()),
        },
    }
}

fn run_pipeline(
    input: &Path,
    output: Option<&Path>,
    policy: &audio::sanitizer::KeepPolicy,
    format: &mut Option<AudioFormat>,
) -> Result<Vec<String>> {
    let source = audio::resolver::resolve(input)?;
    *format = Some(source.format);

    let target = output.unwrap_or(input);
    let staged = utils::file_ops::StagedWrite::begin(input, target)?;
    let removed = audio::sanitizer::MetadataScrubber::scrub(staged.path(), policy)?;

    // Nothing removed and no explicit output: leave the original alone
    // entirely (bytes and mtime).
    if removed.is_empty() && output.is_none() {
        staged.abort();
    } else {
        staged.commit()?;
    }

    Ok(removed)
}

// Re-exports for convenience
pub use audio::resolver::resolve;
pub use audio::sanitizer::{KeepPolicy, MetadataScrubber};
pub use utils::reporting::Logger;
