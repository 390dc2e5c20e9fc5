use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    load_settings, load_settings_from, CardAction, DirectorySink, HttpSplitClient, PageCard,
    SelectedFile, SystemClipboard, UploadController,
};
use shared::domain::{ArtifactKind, PageNumber};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Send a PDF to a split server and save the returned pages
#[derive(Parser, Debug)]
#[command(name = "splitter", version)]
struct Args {
    /// PDF file to split (at most 10 MB)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Base URL of the split server
    #[arg(long)]
    server_url: Option<String>,

    /// Directory the page files are written to
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Also save the PNG preview of every page that has one
    #[arg(long)]
    images: bool,

    /// Copy the PDF base64 of this page to the clipboard
    #[arg(long, value_name = "PAGE")]
    copy_page: Option<u32>,

    /// Give up on the server after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Settings file (defaults to ./splitter.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |key| std::env::var(key).ok()),
        None => load_settings(),
    };
    if let Some(url) = args.server_url.clone() {
        settings.server_url = url;
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = secs;
    }
    let out_dir = args.out.clone().unwrap_or(settings.download_dir.clone());

    let client = HttpSplitClient::new(&settings.server_url)?;
    let mut controller = UploadController::new(settings.request_timeout());

    let candidate = SelectedFile::from_path(&args.input)
        .with_context(|| format!("failed to read input file: {}", args.input.display()))?;
    controller.select(Some(candidate))?;

    println!(
        "Sending {} to {}",
        args.input.display(),
        client.endpoint()
    );
    controller.submit(&client).await?;
    if let Some(notice) = controller.notice() {
        println!("{}", notice.text);
    }

    let cards: Vec<PageCard> = controller
        .results()
        .map(|results| results.cards.clone())
        .unwrap_or_default();
    for card in &cards {
        println!(
            "  page {:>4}  {:>7}  {}",
            card.page_number,
            card.size_label,
            if card.has_image() { "pdf+png" } else { "pdf" }
        );
    }

    let mut downloads = DirectorySink::new(&out_dir);
    if !cards.is_empty() {
        println!("Saving pages to {}", downloads.dir().display());
    }
    let mut clipboard = SystemClipboard::default();
    let mut failures = 0usize;

    for action in cards.iter().flat_map(|card| card.actions.iter()) {
        let wanted = match action {
            CardAction::Download {
                kind: ArtifactKind::Pdf,
                ..
            } => true,
            CardAction::Download {
                kind: ArtifactKind::Png,
                ..
            } => args.images,
            CardAction::Copy { .. } => false,
        };
        if !wanted {
            continue;
        }
        match controller.perform(action, &mut downloads, &mut clipboard) {
            Ok(()) => {
                if let Some(notice) = controller.notice() {
                    println!("{}", notice.text);
                }
            }
            Err(err) => {
                warn!(error = %err, "page download failed");
                failures += 1;
            }
        }
    }

    if let Some(page) = args.copy_page {
        let copy = cards
            .iter()
            .find(|card| card.page_number == PageNumber(page))
            .and_then(|card| {
                card.actions.iter().find(|action| {
                    matches!(
                        action,
                        CardAction::Copy {
                            kind: ArtifactKind::Pdf,
                            ..
                        }
                    )
                })
            });
        let Some(copy) = copy else {
            bail!("page {page} is not part of the split result");
        };
        controller.perform(copy, &mut downloads, &mut clipboard)?;
        println!("Copied page {page} PDF base64 to the clipboard.");
    }

    if failures > 0 {
        bail!("{failures} page file(s) could not be saved");
    }
    Ok(())
}
