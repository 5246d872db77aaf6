//! moviename CLI: identify a movie from a still, a short clip or a
//! social-media link.
//!
//! Set MOVIENAME_API_URL (or API_URL) to point at the analysis backend.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moviename_api_client::ApiClient;
use moviename_cli::{
    error_dialog, init_tracing, render_movie, share_token_from_input, spawn_progress_reporter,
};
use moviename_core::models::content_type_for_filename;
use moviename_core::share::{decode_movie, search_url, share_url};
use moviename_core::{ClientConfig, FileInput, MovieMatch, SubmissionState};
use moviename_processing::{FfmpegFrameExtractor, FrameExtractor, InputValidator};
use moviename_session::{SessionConfig, SubmitOutcome, UploadSession};

#[derive(Parser)]
#[command(name = "moviename", about = "Identify a movie from a still, clip or social link")]
struct Cli {
    /// Analysis backend base URL (overrides MOVIENAME_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Number of frames to sample from a video (overrides MOVIENAME_FRAME_COUNT)
    #[arg(long, global = true)]
    frames: Option<usize>,

    /// Print JSON instead of a human summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the movie in an image, GIF, video or social-media link
    Identify {
        /// Path to an image or video
        #[arg(required_unless_present = "url")]
        file: Option<PathBuf>,
        /// Social-media clip URL (TikTok, Instagram, YouTube Shorts, ...)
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,
    },
    /// Sample frames from a video or GIF and write them as JPEGs
    Frames {
        /// Path to the video or GIF
        file: PathBuf,
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
    /// Share link operations
    Share {
        #[command(subcommand)]
        sub: ShareCommands,
    },
}

#[derive(Subcommand)]
enum ShareCommands {
    /// Show the movie packed into a share token or link
    Decode {
        /// Token or full share link
        token: String,
    },
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

async fn read_input(path: &Path) -> anyhow::Result<FileInput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    let content_type = content_type_for_filename(&name);
    Ok(FileInput::new(name, content_type, bytes))
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid configuration")?;
    if let Some(api_url) = &cli.api_url {
        config.api_url = api_url.trim_end_matches('/').to_string();
    }
    if let Some(frames) = cli.frames {
        config.frame_count = frames;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn print_movie(config: &ClientConfig, movie: &MovieMatch, as_json: bool) -> anyhow::Result<()> {
    let share_link = config
        .share_base_url
        .as_deref()
        .map(|base| share_url(base, movie))
        .transpose()
        .context("Failed to build share link")?;

    if as_json {
        print_json(&json!({
            "movie": movie,
            "search_url": search_url(&movie.title),
            "share_url": share_link,
        }))
    } else {
        println!("{}", render_movie(movie, share_link.as_deref()));
        Ok(())
    }
}

async fn identify(
    config: &ClientConfig,
    file: Option<PathBuf>,
    url: Option<String>,
    as_json: bool,
) -> anyhow::Result<()> {
    let extractor =
        FfmpegFrameExtractor::from_config(config).context("Failed to set up frame extraction")?;
    let client = ApiClient::from_config(config).context("Failed to create API client")?;
    let session = UploadSession::new(
        SessionConfig::from(config),
        Arc::new(extractor),
        Arc::new(client),
    );

    match (file, url) {
        (Some(path), _) => session.select_file(Some(read_input(&path).await?))?,
        (None, Some(url)) => session.set_url(Some(url))?,
        (None, None) => bail!("Provide a FILE or --url"),
    }

    let reporter = (!as_json).then(|| spawn_progress_reporter(session.clone()));
    let outcome = session.submit().await;
    if let Some(reporter) = reporter {
        reporter.abort();
    }

    match outcome {
        SubmitOutcome::Finished(SubmissionState::Succeeded(movie)) => {
            tracing::info!(elapsed_secs = session.elapsed_secs(), "Movie identified");
            print_movie(config, &movie, as_json)
        }
        SubmitOutcome::Finished(SubmissionState::Failed(message)) => {
            bail!("{}", error_dialog(&message))
        }
        SubmitOutcome::Finished(state) => bail!("Submission ended in unexpected state: {}", state),
        SubmitOutcome::Ignored(reason) => bail!("Nothing submitted: {}", reason),
    }
}

async fn extract_frames(config: &ClientConfig, file: &Path, out: &Path) -> anyhow::Result<()> {
    let input = read_input(file).await?;
    InputValidator::default().validate(&input)?;

    let extractor =
        FfmpegFrameExtractor::from_config(config).context("Failed to set up frame extraction")?;
    let frames = if input.is_video() {
        extractor
            .extract_video_frames(&input, config.frame_count)
            .await?
    } else if input.is_animated_image() {
        extractor
            .extract_animated_frames(&input, config.frame_count)
            .await?
    } else {
        bail!("{} is a still image; nothing to sample", input.name);
    };

    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;
    for frame in &frames {
        let path = out.join(frame.file_name());
        tokio::fs::write(&path, &frame.bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", path.display());
    }
    tracing::info!(frames = frames.len(), out = %out.display(), "Frames written");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let as_json = cli.json;

    match cli.command {
        Commands::Identify { file, url } => identify(&config, file, url, as_json).await?,
        Commands::Frames { file, out } => extract_frames(&config, &file, &out).await?,
        Commands::Share { sub } => match sub {
            ShareCommands::Decode { token } => {
                let movie = decode_movie(share_token_from_input(&token))
                    .context("Invalid or corrupted share token")?;
                print_movie(&config, &movie, as_json)?;
            }
        },
    }

    Ok(())
}
