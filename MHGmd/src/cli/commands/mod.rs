use clap::Subcommand;
use std::path::PathBuf;

pub mod execute;
pub mod gmd;

#[derive(Subcommand)]
pub enum Commands {
    /// Show header information of a GMD file
    Info {
        /// GMD file
        path: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List labels with their texts
    List {
        /// GMD file
        path: PathBuf,

        /// Maximum labels to show (0 = all)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Print the text of one label
    Get {
        /// GMD file
        path: PathBuf,

        /// Label index (text id)
        index: usize,
    },

    /// Replace the text of one label
    Set {
        /// GMD file
        path: PathBuf,

        /// Label index (text id)
        index: usize,

        /// New text ("<br>" becomes a line break)
        text: String,
    },

    /// Search label texts, or label names with --name
    Search {
        /// GMD file
        path: PathBuf,

        /// Search term
        query: String,

        /// Search label names instead of text content
        #[arg(long)]
        name: bool,

        /// Maximum results to return
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Find and replace text in all labels
    Replace {
        /// GMD file
        path: PathBuf,

        /// Text to find
        #[arg(long)]
        find: String,

        /// Replacement text
        #[arg(long = "with")]
        replace_with: String,

        /// Match case
        #[arg(long)]
        case_sensitive: bool,

        /// Show what would change without saving
        #[arg(long)]
        dry_run: bool,
    },

    /// Export label texts to a tab-separated text file
    Export {
        /// GMD file
        path: PathBuf,

        /// Output file (defaults to the GMD path with a .csv extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include the text id column
        #[arg(long)]
        id: bool,

        /// Include the label name column
        #[arg(long)]
        name: bool,
    },

    /// Import label texts from an exported text file
    Import {
        /// GMD file to update
        path: PathBuf,

        /// Exported text file
        records: PathBuf,

        /// Match lines to labels by name instead of position
        #[arg(long)]
        by_name: bool,

        /// Keep a copy of the original file as .gmd.bak
        #[arg(long)]
        backup: bool,
    },

    /// Copy label texts from another GMD file
    Merge {
        /// GMD file to update
        path: PathBuf,

        /// GMD file to copy texts from
        source: PathBuf,

        /// Write the result here instead of overwriting the target
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
