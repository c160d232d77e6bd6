use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use filedock_fs::SymlinkPolicy;
use filedock_host::HostOptions;
use filedock_protocol::{BridgeRequest, BridgeResponse};
use filedock_runtime::DEFAULT_MAX_DEPTH;
use log::debug;

use crate::client::{Bridge, BridgeOptions, check, unexpected};
use crate::commands::{CommandResult, OutputOptions, finish};
use crate::printer::{PrintContext, make_printer};

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Folder to scan
    pub root: PathBuf,

    /// Deepest folder level to enter (0 = unbounded). Ignored with --daemon.
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Skip symbolic links instead of following them. Ignored with --daemon.
    #[arg(long)]
    pub no_follow_symlinks: bool,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub bridge: BridgeOptions,
}

impl ScanArgs {
    fn host_options(&self) -> HostOptions {
        let mut options = HostOptions::default();
        options.scan.max_depth = (self.max_depth > 0).then_some(self.max_depth);
        if self.no_follow_symlinks {
            options.scan.symlinks = SymlinkPolicy::Skip;
        }
        options
    }
}

pub fn run(args: ScanArgs) -> ExitCode {
    finish("scan", execute(args))
}

fn execute(args: ScanArgs) -> CommandResult<ExitCode> {
    let bridge = Bridge::connect(&args.bridge, args.host_options())?;
    debug!("[scan] root={} options={:?}", args.root.display(), args.host_options().scan);

    let req = BridgeRequest::GetFolderFiles {
        root: args.root.clone(),
    };
    let records = match check(bridge.call(req)?)? {
        BridgeResponse::FolderFiles(records) => records,
        other => return Err(unexpected("get-folder-files", &other)),
    };

    let ctx = PrintContext::for_records("scan", Some(args.root.as_path()), &records);
    let mut printer = make_printer(args.output.printer_config());

    printer.begin(&ctx).context("failed to write output")?;
    for rec in &records {
        printer
            .print_record(rec, &ctx)
            .context("failed to write output")?;
    }
    printer.finish(&ctx).context("failed to write output")?;

    Ok(ExitCode::SUCCESS)
}
