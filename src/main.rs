// src/main.rs

use syscmd::engine::RunStatus;
use syscmd::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(RunStatus::Success) => {}
        Ok(RunStatus::Error) => std::process::exit(1),
        Err(err) => {
            eprintln!("syscmd error: {err:?}");
            std::process::exit(2);
        }
    }
}

async fn run_main() -> anyhow::Result<RunStatus> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
