// src/main.rs

use tdaemon::errors::TdaemonError;
use tdaemon::{cli, logging, run};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(()) => {}
        Err(TdaemonError::UserDeclined(msg)) => println!("{msg}"),
        Err(err) => {
            eprintln!("tdaemon error: {err}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> tdaemon::errors::Result<()> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    run(args).await
}
