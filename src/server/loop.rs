// Server loop module
// Accepts connections until shutdown is requested, then drains

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::ShutdownSignal;
use crate::config::AppState;
use crate::logger;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the accept loop on the current `LocalSet`.
///
/// After shutdown the listener is closed and in-flight connections get up
/// to `performance.write_timeout` seconds to finish.
pub async fn run_server(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: Arc<ShutdownSignal>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.wait() => break,
        }
    }

    drop(listener);
    logger::log_shutdown(active_connections.load(Ordering::SeqCst));

    let deadline = Duration::from_secs(state.config.performance.write_timeout);
    let drained = tokio::time::timeout(deadline, async {
        while active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    })
    .await;

    if drained.is_err() {
        logger::log_warning(&format!(
            "Shutdown deadline reached with {} connection(s) still open",
            active_connections.load(Ordering::SeqCst)
        ));
    }
    logger::log_info("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::content::MemoryStore;
    use crate::server::create_reusable_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_serves_request_then_shuts_down() {
        let mut config = Config::load_from("/nonexistent/blog-config").unwrap();
        config.logging.access_log = false;
        config.performance.write_timeout = 1;
        let store = Arc::new(MemoryStore::sample().unwrap());
        let state = Arc::new(AppState::new(&config, store));

        let listener = create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(ShutdownSignal::new());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async move {
                let server = tokio::task::spawn_local(run_server(
                    listener,
                    state,
                    Arc::clone(&shutdown),
                ));

                let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
                stream
                    .write_all(b"GET /categories HTTP/1.1\r\nHost: test\r\nConnection: close\r\n\r\n")
                    .await
                    .unwrap();
                let mut raw = String::new();
                stream.read_to_string(&mut raw).await.unwrap();
                assert!(raw.starts_with("HTTP/1.1 200 OK"));
                assert!(raw.contains("\"categories\""));

                shutdown.trigger();
                tokio::time::timeout(Duration::from_secs(5), server)
                    .await
                    .unwrap()
                    .unwrap()
                    .unwrap();
            })
            .await;
    }
}
