// LogSift - platform/fs.rs
//
// File reading for log and sample files.

use crate::util::constants;
use crate::util::error::LogSiftError;
use std::io::{self, Read};
use std::path::Path;

/// Read the full content of a file as a string.
///
/// Invalid UTF-8 is replaced rather than rejected: log files routinely
/// contain stray bytes and a single bad line should not hide the rest.
/// Files above `LARGE_FILE_THRESHOLD` are memory-mapped instead of copied
/// into a heap buffer first.
pub fn read_file_lossy(path: &Path) -> Result<String, LogSiftError> {
    let io_err = |operation: &'static str| {
        move |source: io::Error| LogSiftError::Io {
            path: path.to_path_buf(),
            operation,
            source,
        }
    };

    let mut file = std::fs::File::open(path).map_err(io_err("open"))?;
    let size = file.metadata().map_err(io_err("stat"))?.len();

    let content = if size > constants::LARGE_FILE_THRESHOLD {
        tracing::debug!(path = %path.display(), size, "Memory-mapping large file");
        // SAFETY: the map is read-only and dropped before this function
        // returns; a concurrent truncation by another process can at worst
        // fault this read, same as any other reader of a shrinking file.
        let mmap = unsafe { memmap2::Mmap::map(&file) }.map_err(io_err("mmap"))?;
        String::from_utf8_lossy(&mmap).into_owned()
    } else {
        let mut bytes = Vec::with_capacity(size as usize);
        file.read_to_end(&mut bytes).map_err(io_err("read"))?;
        match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }
    };

    tracing::debug!(path = %path.display(), bytes = content.len(), "File read");
    Ok(content)
}
