//! CLI argument validation functions

use std::fs;
use std::path::PathBuf;

/// Validate that the configuration file exists and is readable
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    readable_file("Configuration file", path_str)
}

/// Validate that the snapshot input file exists and is readable
pub fn validate_input_path(path_str: &str) -> Result<PathBuf, String> {
    readable_file("Input file", path_str)
}

fn readable_file(kind: &str, path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("{} does not exist: '{}'", kind, path_str));
    }

    if !path.is_file() {
        return Err(format!("{} path is not a file: '{}'", kind, path_str));
    }

    match fs::File::open(&path) {
        Ok(_) => Ok(path),
        Err(e) => Err(format!("Cannot read {} '{}': {}", kind.to_lowercase(), path_str, e)),
    }
}
