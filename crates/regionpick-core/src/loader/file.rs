// crates/regionpick-core/src/loader/file.rs
use super::common_io;
use super::DatasetSource;
use crate::error::{Error, Result};
use crate::model::CountryDataset;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

/// Dataset JSON (optionally `.json.gz`) on the local filesystem.
///
/// Loading only reads the source. Snapshots are opt-in
/// ([`FileSource::with_snapshot`]): when enabled, a bincode copy of the
/// validated dataset is written next to the source and preferred on later
/// loads while it is fresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    snapshot: bool,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: false,
        }
    }

    pub fn with_snapshot(mut self, enabled: bool) -> Self {
        self.snapshot = enabled;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot_path(&self) -> PathBuf {
        common_io::snapshot_path(&self.path)
    }

    /// Synchronous load: snapshot if fresh, otherwise JSON (then snapshot).
    pub fn load_blocking(&self) -> Result<CountryDataset> {
        let snapshot = self.snapshot_path();

        // 1. Check snapshot
        if self.snapshot && common_io::is_snapshot_fresh(&self.path, &snapshot) {
            match read_snapshot(&snapshot) {
                Ok(ds) => {
                    log::debug!("Loaded dataset snapshot {}", snapshot.display());
                    return Ok(ds);
                }
                Err(e) => log::warn!("Ignoring unreadable snapshot {}: {e}", snapshot.display()),
            }
        }

        // 2. Parse source
        let reader = common_io::open_stream(&self.path)?;
        let ds = CountryDataset::from_json_reader(reader)?;

        // 3. Best-effort snapshot
        if self.snapshot {
            if let Err(e) = write_snapshot(&snapshot, &ds) {
                log::warn!("Could not write snapshot {}: {e}", snapshot.display());
            }
        }

        Ok(ds)
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<CountryDataset> {
        self.load_blocking()
    }
}

fn read_snapshot(path: &Path) -> Result<CountryDataset> {
    let reader = BufReader::new(File::open(path)?);

    #[cfg(feature = "compact")]
    let mut stream: Box<dyn Read> = Box::new(GzDecoder::new(reader));
    #[cfg(not(feature = "compact"))]
    let mut stream: Box<dyn Read> = Box::new(reader);

    let mut bytes = Vec::new();
    stream.read_to_end(&mut bytes)?;
    let ds: CountryDataset = bincode::deserialize(&bytes)?;

    // Snapshots are only written from validated data, but the file may have
    // been swapped underneath us.
    CountryDataset::from_countries(ds.countries().to_vec())
        .map_err(|e| Error::InvalidData(format!("snapshot {}: {e}", path.display())))
}

fn write_snapshot(path: &Path, ds: &CountryDataset) -> Result<()> {
    let writer = BufWriter::new(File::create(path)?);

    #[cfg(feature = "compact")]
    let mut encoder: Box<dyn Write> = Box::new(GzEncoder::new(writer, Compression::default()));
    #[cfg(not(feature = "compact"))]
    let mut encoder: Box<dyn Write> = Box::new(writer);

    bincode::serialize_into(&mut encoder, ds)?;
    encoder.flush()?;
    Ok(())
}
