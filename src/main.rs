use anyhow::Result;
use clap::Parser;
use kma_weather::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    kma_weather::run(cli).await
}
