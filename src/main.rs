use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use psmask::batch::BatchDecoder;
use psmask::config::Config;
use psmask::{DecodedMask, create_reader, resolve_layout};

#[derive(Parser)]
#[command(name = "psmask", version, about = "Decode polar stereographic mask files")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layout a file name resolves to, without reading it
    Layout {
        identifiers: Vec<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Decode mask files and summarize them
    Inspect {
        files: Vec<PathBuf>,
        /// Report the extent with its lower-left corner at (0, 0)
        #[arg(long)]
        origin_aligned: bool,
        /// Print the number of samples per value
        #[arg(long)]
        counts: bool,
    },
    /// Decode every file listed in a JSON manifest
    Batch { manifest: PathBuf },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Layout { identifiers, json } => layout(&identifiers, json),
        Commands::Inspect {
            files,
            origin_aligned,
            counts,
        } => inspect(&files, origin_aligned, counts),
        Commands::Batch { manifest } => batch(manifest),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn layout(identifiers: &[String], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    for identifier in identifiers {
        let layout = resolve_layout(identifier)?;
        if json {
            println!("{}", serde_json::to_string(&layout)?);
        } else {
            println!("{identifier}\n{layout}\n");
        }
    }
    Ok(())
}

fn inspect(
    files: &[PathBuf],
    origin_aligned: bool,
    counts: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    for file in files {
        let mut mask = create_reader(file.clone()).read_mask()?;
        if origin_aligned {
            mask.extent = mask.extent.translated_to_origin();
        }
        print_mask(file, &mask, counts);
    }
    Ok(())
}

fn batch(manifest: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_file(&manifest)?;
    let outcomes = BatchDecoder::new(config).process()?;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    for outcome in &outcomes {
        match &outcome.result {
            Ok(mask) => {
                let (rows, cols) = mask.raster.shape();
                println!(
                    "ok    {:<24} {}x{} hemisphere {:+}",
                    outcome.name,
                    rows,
                    cols,
                    mask.hemisphere.sign()
                );
            }
            Err(e) => println!("skip  {:<24} {}", outcome.name, e),
        }
    }
    println!("{} decoded, {} skipped", outcomes.len() - failed, failed);

    Ok(())
}

fn print_mask(file: &Path, mask: &DecodedMask, counts: bool) {
    println!("{}", file.display());
    println!("{mask}");
    if counts {
        for (value, count) in mask.raster.value_counts() {
            println!("  {value:>5}: {count}");
        }
    }
    println!();
}
