//! Podorder bulk uploader
//!
//! Uploads files from disk into a storage namespace using the same batched,
//! retrying pipeline the order intake uses, and prints the public locators.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use podorder_core::storage::{StorageConfig, StorageService};
use podorder_core::upload::{Attachment, DestinationNamespace, UploadPipeline, UploadSettings, naming};
use podorder_shared::AppConfig;
use podorder_shared::types::OrderId;

/// Upload order attachments to object storage
#[derive(Parser)]
#[command(name = "podorder-upload")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Destination namespace, e.g. `orders/ORD-LZ3K9Q1A-X7F/designs`
    namespace: String,

    /// Order ID to embed in object names
    #[arg(long)]
    order: Option<OrderId>,

    /// Files to upload
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podorder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;

    let storage = StorageService::from_config(StorageConfig::from_settings(&config.storage)?)?;
    info!(
        provider = storage.provider_name(),
        public_base_url = %storage.config().public_base_url(),
        "Storage configured"
    );

    let settings = UploadSettings::from(&config.upload);
    let pipeline = UploadPipeline::new(Arc::new(storage), settings);

    let namespace = DestinationNamespace::new(cli.namespace)?;
    let mut attachments = Vec::with_capacity(cli.files.len());
    for path in &cli.files {
        attachments.push(read_attachment(path).await?);
    }

    let locators = pipeline
        .upload_all(
            &attachments,
            &namespace,
            cli.order.as_ref().map(OrderId::as_str),
        )
        .await?;

    println!("{}", serde_json::to_string_pretty(&locators)?);

    Ok(())
}

async fn read_attachment(path: &Path) -> Result<Attachment> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid file name: {}", path.display()))?;

    Ok(Attachment::new(name, content_type_for(name), bytes))
}

fn content_type_for(file_name: &str) -> &'static str {
    match naming::extension(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("tif" | "tiff") => "image/tiff",
        Some("pdf") => "application/pdf",
        Some("psd") => "image/vnd.adobe.photoshop",
        Some("ai" | "eps") => "application/postscript",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}
