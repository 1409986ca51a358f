//! Region picker walkthrough over in-memory controls.
//!
//! Run with `cargo run --example picker`.

use futures::executor::block_on;
use regionpick_rs::loader::{default_data_dir, default_dataset_filename, FileSource};
use regionpick_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== regionpick: Region Picker ===\n");

    // Example 1: default country inference
    println!("--- Example 1: Default country per language ---");
    for tag in ["sk", "cs-CZ", "de-AT", "hu", "en-US", "fr"] {
        println!("  {tag:<6} -> {}", infer_default_country(tag));
    }
    println!();

    // Example 2: calling populate before the data is there is harmless
    println!("--- Example 2: Premature population ---");
    let catalog = Catalog::from_json_slice(
        "sk",
        &std::fs::read(default_data_dir().join("catalog.sk.json"))?,
    )?;
    let country = MemorySelect::new();
    let region = MemorySelect::new();
    let picker = RegionPicker::new(country.clone(), region.clone(), catalog).attach();
    picker.borrow_mut().populate_country_options();
    println!("  country options after early call: {}", country.options().len());
    println!();

    // Example 3: load and render
    println!("--- Example 3: Load the bundled dataset ---");
    let source = FileSource::new(default_data_dir().join(default_dataset_filename()));
    let dataset = block_on(source.load())?;
    picker.borrow_mut().install_dataset(dataset);
    for (value, label) in country.values().iter().zip(country.labels()) {
        println!("  {value:<3} {label}");
    }
    println!("  selected: {:?}", picker.borrow().selected_country());
    println!();

    // Example 4: user switches country
    println!("--- Example 4: Switch to CZ ---");
    country.choose("CZ");
    for label in region.labels() {
        println!("  {label}");
    }
    println!("\n  selected: {:?}", picker.borrow().selected_country());

    Ok(())
}
