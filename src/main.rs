use anyhow::Result;
use kinetic::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
