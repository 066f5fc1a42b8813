use anyhow::Result;
use clap::Parser;
use fakenews_dash::{cli::Cli, run};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}
