use std::path::PathBuf;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a config file pre-filled with the default prompt templates
    Init,
    /// Capture the diff against the compare branch and save it as a patch file
    SaveDiff {
        /// Compare branch for this run; stored when it differs from the saved one
        #[clap(short, long)]
        branch: Option<String>,
    },
    /// Copy the diff review prompt for a patch file to the clipboard
    CopyDiffPrompt {
        /// Patch file to reference; a file picker opens when omitted
        #[clap(short, long)]
        file: Option<PathBuf>,
    },
    /// Copy the whole-project review prompt to the clipboard
    CopyPrompt,
    /// Serve the settings panel in the browser
    Panel {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(long)]
        no_browser: bool,
    },
    /// Inspect or edit stored settings
    Config {
        #[clap(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    Show,
    Path,
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
    },
}
