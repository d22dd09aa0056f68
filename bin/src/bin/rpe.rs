use clap::Parser;
use rpe_bin::cli::Cli;
use rpe_log::LogConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match rpe_log::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    }) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {e}");
            None
        },
    };

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = rpe_bin::run(cli, &mut stdout).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
