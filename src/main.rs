use clap::Parser;
use std::sync::Arc;

mod cli;
mod config;
mod error;
mod handler;
mod http;
mod logger;
mod server;

use cli::{Cli, USAGE};
use config::{AppState, Config};

/// Exit status when the build folder has no entry document
const EXIT_MISSING_ENTRY: i32 = 1;

/// Catch a wrong build folder before anything is bound.
///
/// On failure returns the exit code and the text for stderr.
fn preflight(cfg: &Config) -> Result<(), (i32, String)> {
    cfg.check_entry_file()
        .map_err(|e| (EXIT_MISSING_ENTRY, format!("{e}\n{USAGE}")))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load(&cli)?;

    if let Err((code, message)) = preflight(&cfg) {
        eprintln!("{message}");
        std::process::exit(code);
    }

    logger::init(&cfg.logging)?;

    // 创建 Tokio 运行时，根据 workers 配置设置线程数
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers.filter(|&w| w > 0) {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    let addr = cfg.get_socket_addr()?;
    logger::log_server_start(&addr, &cfg);

    let state = Arc::new(AppState::new(cfg)?);
    runtime.block_on(server::run(state))?;
    Ok(())
}
