use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Subcommand};
use filedock_host::HostOptions;
use filedock_protocol::{BridgeRequest, BridgeResponse};

use crate::client::{Bridge, BridgeOptions, check, unexpected};
use crate::commands::{CommandResult, finish};

#[derive(Debug, Args)]
pub struct PickArgs {
    #[command(subcommand)]
    pub target: PickTarget,

    #[command(flatten)]
    pub bridge: BridgeOptions,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum PickTarget {
    /// A single file
    File,
    /// Any number of files
    Files,
    /// A single folder
    Folder,
}

pub fn run(args: PickArgs) -> ExitCode {
    finish("pick", execute(args))
}

fn execute(args: PickArgs) -> CommandResult<ExitCode> {
    let bridge = Bridge::connect(&args.bridge, HostOptions::default())?;

    let req = match args.target {
        PickTarget::File => BridgeRequest::SelectFile,
        PickTarget::Files => BridgeRequest::SelectFiles,
        PickTarget::Folder => BridgeRequest::SelectFolder,
    };
    let op = req.name();

    let picked: Vec<PathBuf> = match check(bridge.call(req)?)? {
        BridgeResponse::File(p) | BridgeResponse::Folder(p) => p.into_iter().collect(),
        BridgeResponse::Files(ps) => ps,
        other => return Err(unexpected(op, &other)),
    };

    if picked.is_empty() {
        eprintln!("[pick] cancelled");
        // Like the dialog programs themselves: 1 means "nothing chosen".
        return Ok(ExitCode::from(1));
    }

    for path in picked {
        println!("{}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}
