use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use mdshelf_cli::{BundleOptions, build_bundle, manifest_json, write_manifest};

#[derive(Parser)]
#[command(name = "mdshelf-bundle")]
#[command(about = "Build the local markdown bundle served by mdshelf", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing the markdown files
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    input: PathBuf,

    /// Output directory for hashed copies and manifest.json
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    output: PathBuf,

    /// Path prefix for manifest entries, relative to the served base URL
    #[arg(long, default_value = "")]
    prefix: String,

    /// Print the manifest instead of writing files
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Default level is overridden by RUST_LOG
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let options = BundleOptions {
        input: cli.input,
        output: cli.output,
        prefix: cli.prefix,
        dry_run: cli.dry_run,
    };

    let result = build_bundle(&options).and_then(|manifest| {
        if options.dry_run {
            println!("{}", manifest_json(&manifest)?);
        } else {
            let path = write_manifest(&options.output, &manifest)?;
            log::info!("wrote {} entries to {}", manifest.len(), path.display());
        }
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
