use std::path::PathBuf;
use clap::Parser;
use crate::config::constants::CONFIG_PATH_ENV;
use crate::enums::commands::Commands;

#[derive(Parser, Debug)]
#[clap(name = "diffprompt")]
#[clap(about = "Save branch diffs as patch files and copy review prompts", long_about = None)]
pub struct Cli {
    /// Project root used for git commands; defaults to the current directory
    #[clap(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Settings file to read and write
    #[clap(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}
