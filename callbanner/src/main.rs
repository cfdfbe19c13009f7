use anyhow::Context;
use callbanner_rs::{
    default_clipboard, BannerConfig, BannerForm, BannerGenerator, DirectorySink, FileSink,
    IconConfig, PathSink, Preset, ProfileUpload,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// callbanner: render stylized "incoming call" banner images
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log progress to stderr (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a banner to a PNG file or the clipboard
    Render {
        /// Company name shown above the caller
        #[arg(long)]
        company: String,

        /// Caller name
        #[arg(long)]
        name: String,

        /// Profile photo (an image file of at most 5 MiB)
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Layout preset
        #[arg(long, default_value_t = Preset::Compact)]
        preset: Preset,

        /// Directory to write fake-call-<name>.png into
        #[arg(long, conflicts_with = "output")]
        output_dir: Option<PathBuf>,

        /// Exact output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Copy the image to the system clipboard
        #[arg(long)]
        clipboard: bool,

        /// Decline button icon (file path or http(s) URL)
        #[arg(long, requires = "accept_icon")]
        decline_icon: Option<String>,

        /// Accept button icon (file path or http(s) URL)
        #[arg(long, requires = "decline_icon")]
        accept_icon: Option<String>,

        /// Additional directory to load fonts from (repeatable)
        #[arg(long)]
        font_dir: Vec<PathBuf>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Timeout for loading each image, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// List the available presets
    Presets {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Render {
            company,
            name,
            photo,
            preset,
            output_dir,
            output,
            clipboard,
            decline_icon,
            accept_icon,
            font_dir,
            config,
            timeout_ms,
        } => {
            let mut config = match config {
                Some(path) => BannerConfig::from_file(&path)?,
                None => BannerConfig::default(),
            };
            if let Some(timeout_ms) = timeout_ms {
                config.decode_timeout_ms = timeout_ms;
            }
            if let (Some(decline), Some(accept)) = (decline_icon, accept_icon) {
                config.icons = Some(IconConfig { decline, accept });
            }
            config.fonts.font_dirs.extend(font_dir);
            config.validate()?;

            let mut form = BannerForm::new(company, name);
            if let Some(photo) = photo {
                let upload = ProfileUpload::from_path(&photo)
                    .await
                    .with_context(|| format!("Invalid profile photo {}", photo.display()))?;
                form = form.with_profile(upload);
            }

            let generator = BannerGenerator::new(config);
            generator.generate(&form, preset).await?;

            let sink: Option<Box<dyn FileSink>> = match (output, output_dir) {
                (Some(path), _) => Some(Box::new(PathSink::new(path))),
                (None, Some(dir)) => Some(Box::new(DirectorySink::new(dir))),
                (None, None) if clipboard => None,
                (None, None) => Some(Box::new(DirectorySink::new("."))),
            };
            let saved = sink.is_some();
            if let Some(sink) = sink {
                let path = generator.download(sink.as_ref())?;
                log::info!("Saved banner to {}", path.display());
                println!("{}", path.display());
            }
            if clipboard {
                if let Err(err) = generator.copy(default_clipboard().as_ref()) {
                    if !saved {
                        // Keep the render rather than losing it on exit.
                        let path = generator.download(&DirectorySink::new("."))?;
                        log::warn!("Clipboard copy failed, saved banner to {}", path.display());
                        println!("{}", path.display());
                    }
                    return Err(err).context("Failed to copy banner to clipboard");
                }
                println!("Copied to clipboard");
            }
        }
        Commands::Presets { json } => {
            if json {
                let presets: Vec<_> = Preset::ALL
                    .iter()
                    .map(|preset| {
                        let (width, height) = preset.dimensions();
                        serde_json::json!({
                            "name": preset,
                            "width": width,
                            "height": height,
                            "default": *preset == Preset::default(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&presets)?);
            } else {
                for preset in Preset::ALL {
                    let (width, height) = preset.dimensions();
                    let marker = if preset == Preset::default() {
                        " (default)"
                    } else {
                        ""
                    };
                    println!("{:<14}{}x{}{}", preset.name(), width, height, marker);
                }
            }
        }
    }

    Ok(())
}
