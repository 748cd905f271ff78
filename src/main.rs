use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use linkkeep::cli::Cli;
use linkkeep::config::StaticConfig;
use linkkeep::interfaces::cli::run_cli_command;
use linkkeep::system::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // 启动阶段的错误直接打印退出
    let (config, _log_guard) = match startup(&cli) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("linkkeep: {:#}", e);
            return ExitCode::from(2);
        }
    };
    debug!("Using API at {}", config.api.base_url);

    match run_cli_command(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            ExitCode::FAILURE
        }
    }
}

fn startup(cli: &Cli) -> anyhow::Result<(StaticConfig, tracing_appender::non_blocking::WorkerGuard)> {
    let mut config = StaticConfig::load_from(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config))?;

    if let Some(api_url) = &cli.api_url {
        config.api.base_url = api_url.clone();
        config.validate().context("invalid --api-url")?;
    }

    let guard = init_logging(&config.logging).context("failed to initialize logging")?;
    Ok((config, guard))
}
