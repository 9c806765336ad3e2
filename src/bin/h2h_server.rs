use std::sync::Arc;

use anyhow::{Context, Result};

use football_h2h::config::Config;
use football_h2h::football_data::FootballData;
use football_h2h::resolver::TeamResolver;
use football_h2h::server::{self, ServiceState, SharedSource};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::from_env();
    let addr = parse_addr_arg().unwrap_or_else(|| cfg.server_addr.clone());

    // The blocking http client must be built (and finally dropped) outside the async runtime.
    let source: SharedSource = Arc::new(FootballData::new(&cfg)?);
    let state = Arc::new(ServiceState::new(
        source.clone(),
        TeamResolver::from_config(&cfg),
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")?;
    runtime.block_on(server::serve(&addr, state))?;
    drop(runtime);
    drop(source);
    Ok(())
}

fn parse_addr_arg() -> Option<String> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(addr) = arg.strip_prefix("--addr=") {
            let trimmed = addr.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == "--addr" {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
