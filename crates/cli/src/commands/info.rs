use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Args;
use filedock_host::HostOptions;
use filedock_protocol::{BridgeRequest, BridgeResponse};

use crate::client::{Bridge, BridgeOptions, check, unexpected};
use crate::commands::{CommandResult, OutputOptions, finish};
use crate::printer::{OutputFormat, PrintContext, make_printer, write_file_info};

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// File or folder to describe
    pub path: PathBuf,

    /// Output as a single JSON object
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub bridge: BridgeOptions,
}

#[derive(Debug, Args)]
pub struct StatArgs {
    /// Files to describe
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub output: OutputOptions,

    #[command(flatten)]
    pub bridge: BridgeOptions,
}

pub fn run_info(args: InfoArgs) -> ExitCode {
    finish("info", execute_info(args))
}

pub fn run_stat(args: StatArgs) -> ExitCode {
    finish("stat", execute_stat(args))
}

fn execute_info(args: InfoArgs) -> CommandResult<ExitCode> {
    let bridge = Bridge::connect(&args.bridge, HostOptions::default())?;

    let info = match check(bridge.call(BridgeRequest::GetFileInfo { path: args.path })?)? {
        BridgeResponse::FileInfo(info) => info,
        other => return Err(unexpected("get-file-info", &other)),
    };

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let mut out = io::stdout().lock();
    write_file_info(&mut out, &info, format).context("failed to write output")?;
    out.flush().context("failed to write output")?;
    Ok(ExitCode::SUCCESS)
}

fn execute_stat(args: StatArgs) -> CommandResult<ExitCode> {
    let bridge = Bridge::connect(&args.bridge, HostOptions::default())?;

    let records = match check(bridge.call(BridgeRequest::GetFilesInfo { paths: args.paths })?)? {
        BridgeResponse::FilesInfo(records) => records,
        other => return Err(unexpected("get-files-info", &other)),
    };

    let ctx = PrintContext::for_records("stat", None, &records);
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
