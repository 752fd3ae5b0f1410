use clap::{Parser, Subcommand};
use photo_mill::imaging::RustBackend;
use photo_mill::{config, manifest, mirror, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "photo-mill")]
#[command(about = "Batch photo optimizer and manifest builder for static portfolio sites")]
#[command(long_about = "\
Batch photo optimizer and manifest builder for static portfolio sites

Two independent pipelines:

  mirror     Walk the photo tree and write one max-width WebP per image
             into a mirrored output tree. Source EXIF is preserved.

  manifest   Walk the category directories (animals/, misc/, people/,
             panos/ by default), write medium and small WebP renditions
             per photo, and build a JSON manifest with capture metadata
             (date, ISO, aperture, shutter) sorted newest-first.

Input layout:

  public/photos/
  ├── animals/                 # Category (manifest pipeline)
  │   ├── foxes/               # Arbitrary nesting below categories
  │   │   └── red_fox.jpg
  │   └── heron.jpg
  ├── misc/
  └── trips/                   # Non-category dirs still mirror fine

Configuration lives in photo-mill.toml next to your project; every key is
optional. Run 'photo-mill gen-config' to print the documented defaults.")]
#[command(version = version_string())]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "photo-mill.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mirror the photo tree as max-width WebP copies
    Mirror,
    /// Build renditions and the JSON photo manifest
    Manifest,
    /// Print a stock photo-mill.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;
    let backend = RustBackend::new();

    match cli.command {
        Command::Mirror => {
            println!(
                "==> Mirroring {} -> {} (max width {}px)",
                config.mirror.input_root.display(),
                config.mirror.output_root.display(),
                config.mirror.max_width
            );
            let summary = mirror::run(&backend, &config.mirror)?;
            output::print_mirror_summary(&summary, &config.mirror.output_root);
        }
        Command::Manifest => {
            println!(
                "==> Building manifest from {}",
                config.manifest.input_root.display()
            );
            let summary = manifest::run(&backend, &config.manifest)?;
            output::print_manifest_summary(&summary);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
