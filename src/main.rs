use anyhow::Result;
use tracing::{error, info};

use ledger_uploader::{logging, App, Config};

const CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = logging::init(logging::LOG_DIR) {
        eprintln!("failed to initialize logging: {e:?}");
        std::process::exit(1);
    }

    if let Err(e) = run().await {
        error!("run aborted: {e:?}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::load(CONFIG_FILE)?;
    let report = App::new(config).run().await?;
    info!("{report}");
    Ok(())
}
