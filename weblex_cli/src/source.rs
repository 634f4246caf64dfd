//! Source reader with compile-time size limits and global logging integration

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use weblex_engine::config::compile_time::source::{LARGE_FILE_THRESHOLD, MAX_FILE_SIZE};
use weblex_engine::config::runtime::SourcePreferences;
use weblex_engine::logging::{codes, Code};
use weblex_engine::{log_debug, log_error, log_success};

const BYTE_ORDER_MARK: char = '\u{feff}';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path} (first bad byte at {valid_up_to})")]
    InvalidEncoding { path: String, valid_up_to: usize },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl SourceError {
    pub fn error_code(&self) -> Code {
        match self {
            SourceError::FileNotFound { .. } => codes::source::FILE_NOT_FOUND,
            SourceError::InvalidPath { .. } => codes::source::INVALID_PATH,
            SourceError::FileTooLarge { .. } => codes::source::FILE_TOO_LARGE,
            SourceError::PermissionDenied { .. } => codes::source::PERMISSION_DENIED,
            SourceError::InvalidEncoding { .. } => codes::source::INVALID_ENCODING,
            SourceError::IoError { .. } => codes::source::IO_ERROR,
        }
    }

    fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => SourceError::PermissionDenied {
                path: path.display().to_string(),
            },
            _ => SourceError::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// A file loaded for lexing
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub size: u64,
    /// A leading byte-order mark was removed from `text`
    pub had_bom: bool,
    pub read_duration: Duration,
}

impl SourceFile {
    pub fn is_large(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

pub struct SourceReader {
    pub strip_byte_order_mark: bool,
    pub enable_performance_logging: bool,
}

impl SourceReader {
    pub fn new() -> Self {
        Self {
            strip_byte_order_mark: true,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &SourcePreferences) -> Self {
        Self {
            strip_byte_order_mark: prefs.strip_byte_order_mark,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_bom_stripping(mut self, enabled: bool) -> Self {
        self.strip_byte_order_mark = enabled;
        self
    }

    pub fn read(&self, file_path: &str) -> Result<SourceFile, SourceError> {
        let start = Instant::now();

        let path = self.validate_path(file_path)?;
        let size = self.check_size(&path, file_path)?;
        let mut text = self.read_text(&path, file_path)?;

        let had_bom = self.strip_byte_order_mark && text.starts_with(BYTE_ORDER_MARK);
        if had_bom {
            text.drain(..BYTE_ORDER_MARK.len_utf8());
        }

        let source = SourceFile {
            path,
            text,
            size,
            had_bom,
            read_duration: start.elapsed(),
        };
        self.log_loaded(&source, file_path);
        Ok(source)
    }

    fn log_loaded(&self, source: &SourceFile, file_path: &str) {
        if self.enable_performance_logging {
            let duration_ms = format!("{:.2}", source.read_duration.as_secs_f64() * 1000.0);
            log_success!(codes::success::SOURCE_LOADED, "Source file loaded",
                "file" => file_path,
                "size_bytes" => source.size,
                "duration_ms" => duration_ms,
                "is_large_file" => source.is_large(),
                "bom_stripped" => source.had_bom);
        } else {
            log_success!(codes::success::SOURCE_LOADED, "Source file loaded",
                "file" => file_path,
                "size_bytes" => source.size);
        }
    }

    fn validate_path(&self, file_path: &str) -> Result<PathBuf, SourceError> {
        if file_path.is_empty() {
            let error = SourceError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        let path = Path::new(file_path);
        if !path.exists() {
            let error = SourceError::FileNotFound {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "File not found", "path" => file_path);
            return Err(error);
        }

        if !path.is_file() {
            let error = SourceError::InvalidPath {
                path: file_path.to_string(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => file_path);
            return Err(error);
        }

        path.canonicalize().map_err(|e| {
            let error = SourceError::from_io(path, e);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => file_path,
                "error" => &error);
            error
        })
    }

    fn check_size(&self, path: &Path, file_path: &str) -> Result<u64, SourceError> {
        let size = fs::metadata(path)
            .map_err(|e| {
                let error = SourceError::from_io(path, e);
                log_error!(error.error_code(), "Failed to read file metadata",
                    "file" => file_path,
                    "error" => &error);
                error
            })?
            .len();

        if size > MAX_FILE_SIZE {
            let error = SourceError::FileTooLarge {
                size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => file_path,
                "size_bytes" => size,
                "limit_bytes" => MAX_FILE_SIZE);
            return Err(error);
        }

        log_debug!("File metadata collected",
            "size_bytes" => size,
            "is_large_file" => size > LARGE_FILE_THRESHOLD);
        Ok(size)
    }

    fn read_text(&self, path: &Path, file_path: &str) -> Result<String, SourceError> {
        let bytes = fs::read(path).map_err(|e| {
            let error = SourceError::from_io(path, e);
            log_error!(error.error_code(), "I/O error reading file",
                "file" => file_path,
                "error" => &error);
            error
        })?;

        String::from_utf8(bytes).map_err(|e| {
            let valid_up_to = e.utf8_error().valid_up_to();
            let error = SourceError::InvalidEncoding {
                path: path.display().to_string(),
                valid_up_to,
            };
            log_error!(error.error_code(), "Invalid UTF-8 encoding in file",
                span = valid_up_to..valid_up_to + 1,
                "file" => file_path);
            error
        })
    }
}

impl Default for SourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().display().to_string()
    }

    #[test]
    fn test_reads_utf8_file() {
        let file = temp_file("var x = 'é';\n".as_bytes());
        let source = SourceReader::new().read(&path_of(&file)).unwrap();
        assert_eq!(source.text, "var x = 'é';\n");
        assert_eq!(source.size, 14);
        assert!(!source.had_bom);
        assert!(!source.is_large());
    }

    #[test]
    fn test_strips_byte_order_mark() {
        let file = temp_file(b"\xEF\xBB\xBF<p>");
        let source = SourceReader::new().read(&path_of(&file)).unwrap();
        assert_eq!(source.text, "<p>");
        assert!(source.had_bom);

        let kept = SourceReader::new()
            .with_bom_stripping(false)
            .read(&path_of(&file))
            .unwrap();
        assert_eq!(kept.text, "\u{feff}<p>");
        assert!(!kept.had_bom);
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let file = temp_file(b"ok\xFFno");
        let err = SourceReader::new().read(&path_of(&file)).unwrap_err();
        assert_matches!(err, SourceError::InvalidEncoding { valid_up_to: 2, .. });
        assert_eq!(err.error_code(), codes::source::INVALID_ENCODING);
    }

    #[test]
    fn test_missing_and_invalid_paths() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.js").display().to_string();

        let reader = SourceReader::new();
        assert_matches!(reader.read(&missing), Err(SourceError::FileNotFound { .. }));
        assert_matches!(reader.read(""), Err(SourceError::InvalidPath { .. }));
        assert_matches!(
            reader.read(&dir.path().display().to_string()),
            Err(SourceError::InvalidPath { .. })
        );
    }

    #[test]
    fn test_from_preferences() {
        let prefs = SourcePreferences {
            enable_performance_logging: false,
            strip_byte_order_mark: false,
        };
        let reader = SourceReader::from_preferences(&prefs);
        assert!(!reader.strip_byte_order_mark);
        assert!(!reader.enable_performance_logging);
    }
}
