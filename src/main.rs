use hukuk::cli;
use hukuk::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    cli::Cli::run().await
}
