pub mod output;
pub mod walker;

use crate::core::errors::{Error, Result};
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileSystem {
        message: format!("Failed to read {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| Error::FileSystem {
        message: format!("Failed to write {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })
}
