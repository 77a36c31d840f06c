use anyhow::Result;
use notechat::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
