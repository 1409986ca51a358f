// crates/regionpick-core/src/loader/common_io.rs
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
pub const SNAPSHOT_SUFFIX: &str = "comp.bin";
#[cfg(not(feature = "compact"))]
pub const SNAPSHOT_SUFFIX: &str = "bin";

/// Opens a file, buffers it, and unwraps gzip when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        Error::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);

    if is_gzip(path) {
        #[cfg(feature = "compact")]
        {
            use flate2::read::GzDecoder;
            return Ok(Box::new(GzDecoder::new(reader)));
        }
        #[cfg(not(feature = "compact"))]
        {
            return Err(Error::InvalidData(format!(
                "{} is gzip compressed but 'compact' is disabled",
                path.display()
            )));
        }
    }

    Ok(Box::new(reader))
}

pub fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// `countries.json` -> `countries.json.comp.bin`
pub fn snapshot_path(source: &Path) -> PathBuf {
    let filename = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    source.with_file_name(format!("{filename}.{SNAPSHOT_SUFFIX}"))
}

/// A snapshot is fresh when it is strictly newer than its source.
pub fn is_snapshot_fresh(source: &Path, snapshot: &Path) -> bool {
    let snap_time = match std::fs::metadata(snapshot).and_then(|m| m.modified()) {
        Ok(t) => t,
        Err(_) => return false,
    };
    match std::fs::metadata(source).and_then(|m| m.modified()) {
        Ok(src_time) => src_time < snap_time,
        // Source gone: the snapshot is all we have
        Err(_) => true,
    }
}
