use std::path::PathBuf;

use clap::{Parser, Subcommand};

use qrcraft::api::SortOrder;
use qrcraft::model::{ContentKind, QrStyle};

/// Returns the version string, with the git hash appended for dev builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{} ({})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "qrcraft")]
#[command(version = get_version())]
#[command(about = "Generate, scan, and track QR codes from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new code
    #[command(alias = "n")]
    Create {
        /// Label for the code
        name: String,

        /// Content to encode
        content: String,

        /// Content kind: url, text, email or phone
        #[arg(short, long, default_value = "url")]
        kind: ContentKind,

        /// Rendering style: default, rounded, dots or elegant
        #[arg(short, long)]
        style: Option<QrStyle>,

        /// Write a preview PNG to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read a QR code from an image file
    Scan {
        /// Path to the image
        image: PathBuf,

        /// Copy the decoded content to the clipboard
        #[arg(short, long)]
        copy: bool,
    },

    /// List saved codes
    #[command(alias = "ls")]
    List {
        /// Search term
        #[arg(short, long)]
        search: Option<String>,

        /// Only show codes of this kind
        #[arg(short, long)]
        kind: Option<ContentKind>,

        /// Sort order: newest, oldest, name or downloads
        #[arg(long, default_value = "newest")]
        sort: SortOrder,
    },

    /// List the scan history
    Scans,

    /// Delete one or more codes
    #[command(alias = "rm")]
    Delete {
        /// Indexes (e.g. 1 3) or a name to match
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Render a code to a PNG file
    #[command(alias = "dl")]
    Download {
        /// Index (e.g. 1) or a name to match
        selector: String,

        /// Directory to write the PNG into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show usage statistics
    Stats,

    /// Get or set configuration
    Config {
        /// Configuration key (default-style, download-width)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
