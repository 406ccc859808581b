use clap::{Parser, Subcommand};
use std::path::PathBuf;
use webp_images::config::{self, Settings, WebpConfig};
use webp_images::{logging, scan};

#[derive(Parser)]
#[command(name = "webp-images")]
#[command(about = "Convert site images to responsive WebP")]
#[command(long_about = "\
Convert site images to responsive WebP

Walks the source directory and, for every JPEG/PNG/WebP image, writes a
full-resolution name.webp plus name-{width}.webp for each configured width
the image is wide enough for. The output tree mirrors the source tree under
{OUTPUT_PATH}/static/images.

  portfolio/static/images/dawn.jpg  →  output/static/images/dawn.webp
                                       output/static/images/dawn-300.webp
                                       output/static/images/dawn-600.webp

Images are only re-encoded when an output is missing or older than the
source. Files in skip directories (default: thumbnails/) and files that look
like generated variants (name-300.jpg) are ignored.

Run 'webp-images gen-config' to print a documented settings file.")]
#[command(version)]
struct Cli {
    /// Settings file (TOML, or JSON with a .json extension)
    #[arg(long, default_value = "webp.toml", global = true)]
    settings: PathBuf,

    /// Source image directory (overrides WEBP_SOURCE_DIR)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Site output directory (overrides OUTPUT_PATH)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert all stale images
    Build,
    /// List the images that would be converted, without encoding
    Check,
    /// Print a stock settings file with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.json_logs);

    match cli.command {
        Command::Build => {
            // Build never fails the caller: problems are logged and the
            // process exits cleanly.
            match load_settings(&cli) {
                Ok(settings) => {
                    webp_images::run(&settings);
                }
                Err(e) => tracing::error!("Image processing failed: {}", e),
            }
        }
        Command::Check => {
            let settings = load_settings(&cli)?;
            let config = WebpConfig::from_settings(&settings)?;
            println!("==> Checking {}", config.source_dir.display());
            if !config.source_dir.exists() {
                println!("Source directory does not exist");
                return Ok(());
            }
            let found = scan::find_candidates(&config);
            for path in &found {
                let shown = path.strip_prefix(&config.source_dir).unwrap_or(path);
                println!("    {}", shown.display());
            }
            println!("==> {} source images", found.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_settings_toml());
        }
    }

    Ok(())
}

/// Load the settings file and apply command-line overrides.
fn load_settings(cli: &Cli) -> Result<Settings, config::ConfigError> {
    let mut settings = Settings::load(&cli.settings)?;
    if let Some(source) = &cli.source {
        settings.set(
            config::SOURCE_DIR_KEY,
            source.to_string_lossy().into_owned(),
        );
    }
    if let Some(output) = &cli.output {
        settings.set(
            config::OUTPUT_PATH_KEY,
            output.to_string_lossy().into_owned(),
        );
    }
    Ok(settings)
}
