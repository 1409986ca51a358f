//! regionpick — command-line interface for regionpick-core
//!
//! Prints what the browser picker would render for a dataset and a
//! language, and validates offline cache manifests before they ship.
//!
//! Usage examples
//! --------------
//!
//! - Show dataset stats
//!   $ regionpick stats
//!
//! - List countries as a Czech speaker would see them
//!   $ regionpick --lang cs --catalog catalog.cs.json countries
//!
//! - List regions of Slovakia, sorted
//!   $ regionpick regions SK
//!
//! - Check default-country inference
//!   $ regionpick default-country de-AT
//!
//! - Validate a manifest
//!   $ regionpick manifest crates/regionpick-wasm/config/cache-manifest.json
//!
//! Set `RUST_LOG=debug` for loader and picker diagnostics.
mod args;

use crate::args::{CliArgs, Commands};
use clap::Parser;
use regionpick_cli::{
    build_picker, country_lines, load_catalog, manifest_lines, region_lines, stats_lines,
    CliPicker, DatasetLocation,
};
use regionpick_core::language::infer_default_country;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    match &args.command {
        Commands::DefaultCountry { tag } => {
            let tag = tag.as_deref().unwrap_or(&args.lang);
            println!("{}", infer_default_country(tag));
        }

        Commands::Manifest { path } => print_lines(manifest_lines(path)?),

        Commands::Stats => print_lines(stats_lines(&open_picker(&args)?)),

        Commands::Countries => print_lines(country_lines(&open_picker(&args)?)),

        Commands::Regions { code } => {
            let mut picker = open_picker(&args)?;
            let lines = region_lines(&mut picker, code)?;
            if lines.is_empty() {
                println!("{code} has no regions");
            } else {
                print_lines(lines);
            }
        }
    }

    Ok(())
}

/// Loads dataset and catalog as selected on the command line.
fn open_picker(args: &CliArgs) -> anyhow::Result<CliPicker> {
    let location = match (&args.input, &args.url) {
        (_, Some(url)) => DatasetLocation::Url(url.clone()),
        (Some(path), None) => DatasetLocation::File {
            path: PathBuf::from(path),
            snapshot: args.snapshot,
        },
        (None, None) => DatasetLocation::bundled(),
    };

    let dataset = location.load()?;
    let catalog = load_catalog(args.catalog.as_deref(), &args.lang)?;
    Ok(build_picker(dataset, catalog))
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = CliArgs::parse_from(["regionpick", "regions", "CZ", "--lang", "cs"]);
        assert_eq!(args.lang, "cs");
        assert!(matches!(args.command, Commands::Regions { ref code } if code == "CZ"));
    }

    #[test]
    fn snapshot_is_opt_in() {
        let args = CliArgs::parse_from(["regionpick", "--input", "x.json", "stats"]);
        assert!(!args.snapshot);

        let args = CliArgs::parse_from(["regionpick", "stats", "--input", "x.json", "--snapshot"]);
        assert!(args.snapshot);
    }
}
