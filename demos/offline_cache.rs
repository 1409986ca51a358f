//! Offline cache lifecycle against the in-memory backends.
//!
//! Run with `cargo run --example offline_cache`.

use futures::executor::block_on;
use regionpick_rs::offline::{
    CacheManifest, CacheStorage, MemoryCacheStorage, MemoryNetwork, OfflineWorker,
};

fn main() -> regionpick_rs::Result<()> {
    println!("=== regionpick: Offline Cache ===\n");

    let network = MemoryNetwork::new();
    network
        .serve("/", "<html>")
        .serve("/js/app.js", "app()")
        .serve("/data/countries.json", "{}");

    let storage = MemoryCacheStorage::new(network.clone());
    storage.open("regionpick-cache-v87");

    let manifest = CacheManifest::new(
        "regionpick-cache-v88",
        ["/", "/js/app.js", "/data/countries.json"],
    )?;
    let worker = OfflineWorker::new(manifest, storage, network.clone());

    println!("--- install ---");
    let outcome = block_on(worker.install())?;
    println!("  cached {} assets, skip waiting: {}", outcome.cached, outcome.skip_waiting);

    println!("--- activate ---");
    let deleted = block_on(worker.activate())?;
    println!("  deleted: {deleted:?}");
    println!("  buckets: {:?}", block_on(worker.storage().bucket_names())?);

    println!("--- fetch while offline ---");
    network.set_offline(true);
    for url in ["/js/app.js", "/img/logo.png"] {
        match block_on(worker.handle_fetch(url)) {
            Ok(served) => println!("  {url}: cache hit = {}", served.is_from_cache()),
            Err(e) => println!("  {url}: {e}"),
        }
    }

    Ok(())
}
