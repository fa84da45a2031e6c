use std::path::Path;
use lofty::{FileType, Probe};
use crate::{AudioFile, AudioFormat, Result, ScrubError};

/// Validates the input path and detects the container format.
///
/// This is a read-only probe: it checks that the path is a regular,
/// non-empty, readable file and sniffs the magic bytes through lofty.
/// Extension is not trusted for format detection.
pub fn resolve(path: impl AsRef<Path>) -> Result<AudioFile> {
    let path = path.as_ref();

    let metadata = std::fs::metadata(path)
        .map_err(|e| ScrubError::Unreadable(format!("{}: {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(ScrubError::Unreadable(format!(
            "{}: not a regular file",
            path.display()
        )));
    }
    if metadata.len() == 0 {
        return Err(ScrubError::Unreadable(format!(
            "{}: file is empty",
            path.display()
        )));
    }

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ScrubError::Unreadable(format!("{}: invalid filename", path.display())))?
        .to_string();

    let probe = Probe::open(path)
        .map_err(|e| ScrubError::Unreadable(format!("{}: {}", path.display(), e)))?
        .guess_file_type()
        .map_err(|e| ScrubError::Unreadable(format!("{}: {}", path.display(), e)))?;

    let format = match probe.file_type() {
        Some(FileType::Mpeg) => AudioFormat::Mp3,
        Some(FileType::Wav) => AudioFormat::Wav,
        Some(FileType::Flac) => AudioFormat::Flac,
        Some(other) => {
            return Err(ScrubError::UnsupportedFormat(format!(
                "{}: detected {:?}, supported formats are MP3, WAV, FLAC",
                path.display(),
                other
            )))
        }
        None => {
            return Err(ScrubError::UnsupportedFormat(format!(
                "{}: not a recognized audio container",
                path.display()
            )))
        }
    };

    log::debug!("resolved {} as {}", path.display(), format);

    Ok(AudioFile {
        path: path.to_path_buf(),
        file_name,
        format,
        size_bytes: metadata.len(),
    })
}
