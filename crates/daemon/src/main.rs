use std::sync::Arc;

mod config;
mod rpc;
mod state;

use config::DaemonConfig;
use filedock_runtime::logging;
use state::DaemonState;

use log::info;

fn main() -> anyhow::Result<()> {
    logging::init().ok();

    let config = DaemonConfig::from_env()?;

    info!(
        "Starting filedock daemon: socket={}, scan={:?}, max_read_bytes={:?}",
        config.socket_path.display(),
        config.host.scan,
        config.host.max_read_bytes,
    );

    let state = Arc::new(DaemonState::new(config)?);
    rpc::run_rpc_server(state)
}
