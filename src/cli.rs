use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "osthasher",
    about = "Print the OpenSubtitles quick hash of files"
)]
pub struct Cli {
    /// Files to hash
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Also print the file size between the hash and the filename
    #[arg(short, long)]
    pub size: bool,
}
