mod cli;
mod config;
mod hash;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    let with_size = cli.size || config.size;

    // The first failing file aborts the whole run.
    for path in &cli.files {
        let (size, fingerprint) = hash::hash_file(path)?;
        if with_size {
            println!("{:016x}\t{}\t{}", fingerprint, size, path.display());
        } else {
            println!("{:016x}\t{}", fingerprint, path.display());
        }
    }

    Ok(())
}
