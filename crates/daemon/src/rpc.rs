use std::fs;
use std::io::{self, Write};
use std::os::unix::fs::PermissionsExt;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use filedock_protocol::codec::{MAX_FRAME_LEN, encode_message, read_message, write_frame};
use filedock_protocol::{BridgeRequest, BridgeResponse};
use log::{debug, error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::flag;

use crate::state::DaemonState;

/// How long the accept loop sleeps between shutdown checks when idle.
const ACCEPT_POLL: Duration = Duration::from_millis(50);

/// RAII guard that ensures the Unix socket file is removed on shutdown,
/// even if we return early or panic.
struct SocketGuard<'a> {
    path: &'a Path,
}

impl<'a> Drop for SocketGuard<'a> {
    fn drop(&mut self) {
        if let Err(err) = fs::remove_file(self.path) {
            if err.kind() != io::ErrorKind::NotFound {
                error!(
                    "Failed to remove Unix socket at {} on shutdown: {err}",
                    self.path.display()
                );
            }
        }
    }
}

pub fn run_rpc_server(state: Arc<DaemonState>) -> anyhow::Result<()> {
    let shutdown = Arc::new(AtomicBool::new(false));

    // Signal handlers only set the flag; the accept loop polls it.
    for sig in [SIGINT, SIGTERM] {
        flag::register(sig, Arc::clone(&shutdown))
            .with_context(|| format!("Failed to register signal handler for {sig}"))?;
    }

    let socket_path = state.config.socket_path.clone();
    let listener = bind_socket(&socket_path)?;

    // Ensure socket is cleaned up on any exit path.
    let _socket_guard = SocketGuard {
        path: socket_path.as_path(),
    };

    info!("filedock daemon listening on {}", socket_path.display());
    serve(listener, state, &shutdown)?;
    info!("RPC server shutdown complete.");
    Ok(())
}

/// Bind the bridge socket, replacing a stale socket file and restricting
/// access to the current user.
fn bind_socket(socket_path: &Path) -> anyhow::Result<UnixListener> {
    if let Some(parent) = socket_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create socket directory {}", parent.display())
        })?;
    }

    if socket_path.exists() {
        fs::remove_file(socket_path).with_context(|| {
            format!(
                "Failed to remove existing socket at {}",
                socket_path.display()
            )
        })?;
    }

    let listener = UnixListener::bind(socket_path)
        .with_context(|| format!("Failed to bind Unix socket at {}", socket_path.display()))?;

    fs::set_permissions(socket_path, fs::Permissions::from_mode(0o600)).with_context(|| {
        format!(
            "Failed to restrict permissions on {}",
            socket_path.display()
        )
    })?;

    Ok(listener)
}

/// Accept connections until `shutdown` is set. Each connection carries one
/// request and is served on its own thread.
fn serve(
    listener: UnixListener,
    state: Arc<DaemonState>,
    shutdown: &AtomicBool,
) -> anyhow::Result<()> {
    listener
        .set_nonblocking(true)
        .context("Failed to make listener non-blocking")?;

    while !shutdown.load(Ordering::Relaxed) {
        match listener.accept() {
            Ok((stream, _addr)) => {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    if let Err(err) = handle_client(stream, &state) {
                        error!("Error while handling client: {err:#}");
                    }
                });
            }
            Err(ref err) if err.kind() == io::ErrorKind::WouldBlock => {
                thread::sleep(ACCEPT_POLL);
            }
            Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                error!("Accept error: {err}");
                thread::sleep(ACCEPT_POLL);
            }
        }
    }

    info!("Shutdown signal observed; stopping RPC server.");
    Ok(())
}

fn handle_client(mut stream: UnixStream, state: &DaemonState) -> anyhow::Result<()> {
    // Some platforms hand out accepted sockets with the listener's O_NONBLOCK.
    stream
        .set_nonblocking(false)
        .context("Failed to make client stream blocking")?;

    let request: BridgeRequest =
        read_message(&mut stream).context("Failed to read BridgeRequest")?;

    let op = request.name();
    debug!("Received request: {op}");

    let response: BridgeResponse = state.host.handle(request);

    send_reply(&mut stream, op, &response, MAX_FRAME_LEN).context("Failed to write BridgeResponse")
}

/// Write `response`, or an `Error` reply in its place when it does not fit
/// in a single frame.
fn send_reply<W: Write>(
    writer: &mut W,
    op: &str,
    response: &BridgeResponse,
    limit: usize,
) -> anyhow::Result<()> {
    let payload = match encode_message(response, limit) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("[{op}] {} reply dropped: {err}", response.kind());
            let reply = BridgeResponse::Error(format!("{op} reply too large to send: {err}"));
            encode_message(&reply, limit)?
        }
    };

    write_frame(writer, &payload)
}

#[cfg(test)]
#[path = "rpc_tests.rs"]
mod tests;
