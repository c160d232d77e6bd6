use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use filedock_protocol::{BridgeRequest, BridgeResponse};
use filedock_runtime::default_socket_path;

use crate::client::{Bridge, check, unexpected};
use crate::commands::{CommandResult, finish};

#[derive(Debug, Args)]
pub struct PingArgs {
    /// Daemon socket
    #[arg(long, value_name = "PATH")]
    pub socket_path: Option<PathBuf>,
}

pub fn run(args: PingArgs) -> ExitCode {
    finish("ping", execute(args))
}

fn execute(args: PingArgs) -> CommandResult<ExitCode> {
    let socket = args.socket_path.unwrap_or_else(default_socket_path);
    let bridge = Bridge::Daemon(socket.clone());

    let started = Instant::now();
    match check(bridge.call(BridgeRequest::Ping)?)? {
        BridgeResponse::Pong => {}
        other => return Err(unexpected("ping", &other)),
    }
    let elapsed = started.elapsed();

    let status = match check(bridge.call(BridgeRequest::Status)?)? {
        BridgeResponse::Status(line) => line,
        other => return Err(unexpected("status", &other)),
    };

    println!("pong from {} in {:.2?}", socket.display(), elapsed);
    println!("{}", status);
    Ok(ExitCode::SUCCESS)
}
