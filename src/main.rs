use anyhow::Result;
use clap::Parser;

use gpumon::Config;

#[tokio::main]
async fn main() -> Result<()> {
    gpumon::init_logging();

    let config = Config::parse();
    gpumon::server::run(config).await
}
