use std::os::unix::net::UnixStream;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use filedock_host::{Host, HostOptions, picker_from_env};
use filedock_protocol::codec::{read_message, write_message};
use filedock_protocol::{BridgeRequest, BridgeResponse};
use filedock_runtime::default_socket_path;
use log::debug;

#[derive(Debug, Args)]
pub struct BridgeOptions {
    /// Send the request to the background daemon instead of running it in-process
    #[arg(long)]
    pub daemon: bool,

    /// Daemon socket (implies --daemon)
    #[arg(long, value_name = "PATH")]
    pub socket_path: Option<PathBuf>,
}

/// Where bridge requests are executed.
pub enum Bridge {
    /// Same dispatcher the daemon runs, in this process.
    Local(Host),
    /// Through the daemon's Unix socket.
    Daemon(PathBuf),
}

impl Bridge {
    pub fn connect(opts: &BridgeOptions, local: HostOptions) -> Result<Self> {
        if opts.daemon || opts.socket_path.is_some() {
            let socket = opts.socket_path.clone().unwrap_or_else(default_socket_path);
            return Ok(Bridge::Daemon(socket));
        }

        Ok(Bridge::Local(Host::new(local, picker_from_env()?)))
    }

    pub fn call(&self, req: BridgeRequest) -> Result<BridgeResponse> {
        match self {
            Bridge::Local(host) => Ok(host.handle(req)),
            Bridge::Daemon(socket_path) => {
                debug!("[client] {} via {}", req.name(), socket_path.display());

                let mut stream = UnixStream::connect(socket_path).with_context(|| {
                    format!(
                        "failed to connect to filedock daemon at {}",
                        socket_path.display()
                    )
                })?;

                write_message(&mut stream, &req)?;
                read_message(&mut stream)
            }
        }
    }
}

/// Turn a bridge-level error into a CLI error, passing everything else through.
pub fn check(resp: BridgeResponse) -> Result<BridgeResponse> {
    match resp {
        BridgeResponse::Error(msg) => Err(anyhow!(msg)),
        other => Ok(other),
    }
}

pub fn unexpected(op: &str, resp: &BridgeResponse) -> anyhow::Error {
    anyhow!("unexpected {} response to {op}", resp.kind())
}
