// Server module entry point
// Listener setup, connection handling and the accept loop with graceful shutdown

mod connection;
mod listener;
mod signal;

// `loop` is a keyword, so the module is named server_loop
#[path = "loop.rs"]
mod server_loop;

pub use listener::create_reusable_listener;
pub use server_loop::run_server;
pub use signal::{start_signal_handler, ShutdownSignal};
