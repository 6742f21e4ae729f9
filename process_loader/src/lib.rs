//! # Process Loader
//!
//! Turns a process-list file into validated [`ProcessDescriptor`]s.
//!
//! Everything the scheduler core assumes about its input is checked here,
//! once, before the first tick. A file that loads is a file the simulation
//! can run to completion.
//!
//! ## Text Format
//!
//! One process per line:
//!
//! ```text
//! # arrival cpu_time [io_offset io_duration]...
//! 0 4 1 2
//! 0 2
//! 3 6 2 1 4 3
//! ```
//!
//! Ids are assigned in line order starting at 0. Blank lines and `#`
//! comments are ignored.
//!
//! ## JSON Format
//!
//! ```text
//! [
//!   { "arrival": 0, "cpu_time": 4, "io": [[1, 2]] },
//!   { "id": 7, "arrival": 0, "cpu_time": 2 }
//! ]
//! ```
//!
//! `id` is optional; a missing id is the entry's position in the array.

pub mod error;
pub mod json;
pub mod text;
pub mod validate;

pub use error::{LoaderError, ValidationError};
pub use validate::validate;

use core_types::ProcessDescriptor;
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk format of a process list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Whitespace-separated lines
    Text,
    /// JSON array of process objects
    Json,
    /// Pick by file extension: `.json` is JSON, anything else is text
    Auto,
}

impl InputFormat {
    /// Resolves `Auto` against a path
    pub fn resolve(self, path: &Path) -> InputFormat {
        match self {
            InputFormat::Auto => match path.extension().and_then(|ext| ext.to_str()) {
                Some(ext) if ext.eq_ignore_ascii_case("json") => InputFormat::Json,
                _ => InputFormat::Text,
            },
            explicit => explicit,
        }
    }
}

/// Parses and validates a process list held in memory
pub fn parse(source: &str, format: InputFormat) -> Result<Vec<ProcessDescriptor>, LoaderError> {
    let descriptors = match format {
        InputFormat::Json => json::parse_json(source)?,
        InputFormat::Text | InputFormat::Auto => text::parse_text(source)?,
    };
    validate(&descriptors)?;
    Ok(descriptors)
}

/// Reads, parses and validates a process-list file
pub fn load_file(
    path: impl AsRef<Path>,
    format: InputFormat,
) -> Result<Vec<ProcessDescriptor>, LoaderError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let descriptors = parse(&source, format.resolve(path))?;
    info!(
        path = %path.display(),
        processes = descriptors.len(),
        "loaded process list"
    );
    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ProcessId;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_resolution() {
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("procs.JSON")),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("procList.txt")),
            InputFormat::Text
        );
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("no_extension")),
            InputFormat::Text
        );
        assert_eq!(
            InputFormat::Text.resolve(Path::new("procs.json")),
            InputFormat::Text
        );
    }

    #[test]
    fn test_load_text_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 4 1 2").unwrap();
        writeln!(file, "2 1").unwrap();

        let descs = load_file(file.path(), InputFormat::Auto).unwrap();
        assert_eq!(descs.len(), 2);
        assert_eq!(descs[1].id, ProcessId::new(1));
        assert_eq!(descs[1].arrival, 2);
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"arrival": 1, "cpu_time": 3, "io": [[2, 5]]}}]"#).unwrap();

        let descs = load_file(file.path(), InputFormat::Auto).unwrap();
        assert_eq!(descs.len(), 1);
        assert_eq!(descs[0].io_events.len(), 1);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let path = PathBuf::from("/nonexistent/procList.txt");
        let err = load_file(&path, InputFormat::Auto).unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/procList.txt"));
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "0 2 2 1").unwrap();

        let err = load_file(file.path(), InputFormat::Text).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::Invalid(ValidationError::OffsetOutOfRange { .. })
        ));
    }
}
