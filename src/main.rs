use std::path::Path;
use std::sync::Arc;

mod config;
mod content;
mod error;
mod handler;
mod http;
mod images;
mod logger;
mod lookup;
mod routing;
mod server;

use content::{ContentStore, MemoryStore};
use server::{create_reusable_listener, run_server, start_signal_handler, ShutdownSignal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional first argument: config file path without extension
    let cfg = match std::env::args().nth(1) {
        Some(path) => config::Config::load_from(&path)?,
        None => config::Config::load()?,
    };
    logger::init(&cfg.logging)?;

    // Worker thread count from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let (store, source) = open_store(cfg.content.data_file.as_deref())?;
    let state = Arc::new(config::AppState::new(&cfg, store));

    let listener = create_reusable_listener(addr)?;
    logger::log_server_start(&addr, &cfg, &state.routes, &source);

    let shutdown = Arc::new(ShutdownSignal::new());
    start_signal_handler(Arc::clone(&shutdown));

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local.run_until(run_server(listener, state, shutdown)).await
}

/// Dataset file when configured, bundled sample content otherwise
fn open_store(
    data_file: Option<&str>,
) -> Result<(Arc<dyn ContentStore>, String), content::StoreError> {
    let store = match data_file {
        Some(path) => MemoryStore::from_file(Path::new(path))?,
        None => MemoryStore::sample()?,
    };
    let source = format!(
        "{} ({} blogs)",
        data_file.unwrap_or("bundled sample"),
        store.blog_count()
    );
    Ok((Arc::new(store), source))
}
