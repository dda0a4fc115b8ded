// Server module entry point
// Binds the listener and runs the accept loop

pub mod connection;
pub mod listener;

// Rust 不允许 loop 作为模块名（关键字），改用 server_loop
#[path = "loop.rs"]
pub mod server_loop;

use std::sync::Arc;

use crate::config::AppState;
use crate::error::StartupError;

pub use listener::create_listener;
pub use server_loop::start_server_loop;

/// Bind the configured address and serve until the process is killed
pub async fn run(state: Arc<AppState>) -> Result<(), StartupError> {
    let addr = state.config.get_socket_addr()?;
    let listener = create_listener(addr)?;
    start_server_loop(listener, state).await;
    Ok(())
}
