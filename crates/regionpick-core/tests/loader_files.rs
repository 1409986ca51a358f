#![cfg(feature = "files")]

use futures::executor::block_on;
use regionpick_core::loader::{default_data_dir, default_dataset_filename, DatasetSource, FileSource};
use regionpick_core::offline::CacheManifest;
use regionpick_core::Error;
use std::fs;

const SMALL: &str = r#"{ "countries": [
    { "code": "SK", "nameKey": "country.sk", "regions": { "BA": "region.ba" } },
    { "code": "CZ", "nameKey": "country.cz" },
    { "code": "AT", "nameKey": "country.at", "regions": null }
] }"#;

#[test]
fn bundled_dataset_is_valid() {
    let source = FileSource::new(default_data_dir().join(default_dataset_filename()));
    let ds = block_on(source.load()).unwrap();
    assert_eq!(ds.countries()[0].code, "SK");
    assert_eq!(ds.find("SK").unwrap().regions.len(), 8);
}

#[test]
fn snapshot_is_written_and_reused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    fs::write(&path, SMALL).unwrap();

    let source = FileSource::new(&path).with_snapshot(true);
    let first = source.load_blocking().unwrap();
    assert!(source.snapshot_path().exists());

    let second = source.load_blocking().unwrap();
    assert_eq!(first.countries(), second.countries());
    assert!(!second.find("AT").unwrap().has_regions());

    // A newer source makes the snapshot stale
    std::thread::sleep(std::time::Duration::from_millis(20));
    fs::write(&path, r#"{ "countries": [ { "code": "AT", "nameKey": "country.at" } ] }"#)
        .unwrap();
    let third = source.load_blocking().unwrap();
    assert_eq!(third.countries()[0].code, "AT");
}

#[test]
fn plain_load_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    fs::write(&path, SMALL).unwrap();

    let source = FileSource::new(&path);
    assert_eq!(source.load_blocking().unwrap().len(), 3);
    assert!(!source.snapshot_path().exists());

    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("nope.json"));
    assert!(matches!(source.load_blocking(), Err(Error::NotFound(_))));
}

#[test]
fn invalid_dataset_is_rejected_without_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json");
    fs::write(&path, r#"{ "countries": [] }"#).unwrap();

    let source = FileSource::new(&path).with_snapshot(true);
    assert!(matches!(source.load_blocking(), Err(Error::InvalidData(_))));
    assert!(!source.snapshot_path().exists());
}

#[cfg(feature = "compact")]
#[test]
fn gzip_source_is_decompressed() {
    use flate2::{write::GzEncoder, Compression};
    use std::io::Write;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("countries.json.gz");
    let mut enc = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    enc.write_all(SMALL.as_bytes()).unwrap();
    enc.finish().unwrap();

    let ds = FileSource::new(&path).load_blocking().unwrap();
    assert_eq!(ds.len(), 3);
}

#[test]
fn manifest_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("manifest.json");
    fs::write(&path, r#"{ "cache_name": "app-v3", "assets": ["/", "/app.js"] }"#).unwrap();

    let manifest = CacheManifest::load_from_path(&path).unwrap();
    assert_eq!(manifest.cache_name, "app-v3");
    assert_eq!(manifest.assets.len(), 2);
}
