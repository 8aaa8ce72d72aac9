//! sdkcat - SDK manifest helper CLI

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sdkcat::{aggregate, generate, Config};

#[derive(Parser)]
#[command(name = "sdkcat")]
#[command(about = "Generate and aggregate per-agent Xcode SDK manifests")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write this agent's SDK descriptor fragment
    Generate {
        /// Directory to write the fragment into
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Merge descriptor fragments into per-platform manifest files
    Aggregate {
        /// Directory to write merged manifests into
        #[arg(long)]
        output_dir: PathBuf,

        /// Candidate fragment files (non-matching names are skipped)
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    match cli.command {
        Commands::Generate { output_dir } => {
            let config = match Config::from_env() {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            match generate(&config, &output_dir, debug) {
                Ok(path) => println!("Wrote {}", path.display()),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Aggregate { output_dir, files } => {
            match aggregate(&output_dir, &files, debug) {
                Ok(written) => {
                    for path in written {
                        println!("Wrote {}", path.display());
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
