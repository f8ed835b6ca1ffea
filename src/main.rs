use std::process::ExitCode;

use blocktext::bootstrap::{init_tracing, run};
use blocktext::BlocktextConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match BlocktextConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("blocktext: {e}");
            return ExitCode::from(1);
        }
    };

    if let Err(e) = init_tracing(&config) {
        eprintln!("blocktext: {e:#}");
        return ExitCode::from(1);
    }

    if let Err(e) = run(config).await {
        tracing::error!("blocktext error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
