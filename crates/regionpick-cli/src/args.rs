use clap::{Parser, Subcommand};

/// CLI arguments for regionpick-cli
#[derive(Debug, Parser)]
#[command(
    name = "regionpick",
    version,
    about = "Inspect country/region datasets, default-country inference and offline cache manifests"
)]
pub struct CliArgs {
    /// Path to the dataset JSON or .json.gz (default: the bundled sample)
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<String>,

    /// Download the dataset from this URL instead (needs the `fetch` feature)
    #[arg(long = "url", global = true, conflicts_with = "input")]
    pub url: Option<String>,

    /// Translation catalog: a JSON object of key -> text
    #[arg(short = 'c', long = "catalog", global = true)]
    pub catalog: Option<String>,

    /// Locale tag treated as the current language (e.g. sk, cs-CZ, de-AT)
    #[arg(short = 'l', long = "lang", global = true, default_value = "sk")]
    pub lang: String,

    /// Keep a binary snapshot next to --input and reuse it while fresh
    #[arg(long = "snapshot", global = true)]
    pub snapshot: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset
    Stats,

    /// List countries in dataset order; the inferred default is starred
    Countries,

    /// List the regions of a country, sorted by localized name
    Regions {
        /// Country code (e.g. SK)
        code: String,
    },

    /// Print the default country for a locale tag (default: --lang)
    DefaultCountry {
        /// Locale tag such as en-US
        tag: Option<String>,
    },

    /// Validate an offline cache manifest and print its contents
    Manifest {
        /// Path to the manifest JSON
        path: String,
    },
}
