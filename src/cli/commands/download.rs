use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::client::{DocumentApi, HttpDocumentClient};
use crate::cli::args::DownloadArgs;
use crate::config::Config;
use crate::error::{HukukError, Result};
use crate::progress::{messages, LoadingIndicator, ProgressManager};

/// Execute download command
pub async fn execute(args: DownloadArgs, quiet: bool, verbose: bool) -> Result<()> {
    if args.id.trim().is_empty() {
        return Err(HukukError::InvalidInput("Document id cannot be empty".to_string()));
    }

    let config = Config::load()?;
    let mut client_config = config.client_config();
    if let Some(base_url) = args.base_url {
        client_config.base_url = base_url;
    }
    let client = HttpDocumentClient::new(client_config)?;

    let progress = ProgressManager::new(quiet, verbose);
    let indicator = LoadingIndicator::start(&progress, messages::DOWNLOADING);
    let path = download_to(&client, &args.id, args.output.as_deref()).await;
    indicator.finish_and_clear();
    let path = path?;

    if !quiet {
        println!("{} {}", "📥".green(), path.display());
    }
    Ok(())
}

/// Fetch a document and write it to `output` or to the name the service suggests
pub async fn download_to(api: &dyn DocumentApi, document_id: &str, output: Option<&Path>) -> Result<PathBuf> {
    let document = api.download(document_id).await?;
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&document.file_name));
    fs::write(&path, &document.bytes)?;
    Ok(path)
}
