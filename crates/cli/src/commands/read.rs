use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Args;
use filedock_host::HostOptions;
use filedock_protocol::{BridgeRequest, BridgeResponse};
use filedock_runtime::{DEFAULT_MAX_READ_BYTES, MAX_CHUNK_LEN};
use log::debug;

use crate::client::{Bridge, BridgeOptions, check, unexpected};
use crate::commands::{CommandResult, finish};

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// File to read
    pub path: PathBuf,

    /// Write the bytes here instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Fetch the file in pieces of this many bytes instead of all at once
    #[arg(long, value_name = "BYTES", value_parser = clap::value_parser!(u32).range(1..=MAX_CHUNK_LEN as i64))]
    pub chunk_size: Option<u32>,

    /// Refuse whole-file reads above this size (0 = unbounded). Ignored with --daemon.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_READ_BYTES)]
    pub max_read_bytes: u64,

    #[command(flatten)]
    pub bridge: BridgeOptions,
}

pub fn run(args: ReadArgs) -> ExitCode {
    finish("read", execute(args))
}

fn execute(args: ReadArgs) -> CommandResult<ExitCode> {
    let local = HostOptions {
        max_read_bytes: (args.max_read_bytes > 0).then_some(args.max_read_bytes),
        ..HostOptions::default()
    };
    let bridge = Bridge::connect(&args.bridge, local)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let written = match args.chunk_size {
        None => read_whole(&bridge, &args.path, &mut out)?,
        Some(len) => read_chunked(&bridge, &args.path, len, &mut out)?,
    };
    out.flush().context("failed to write output")?;

    debug!("[read] {} bytes from {}", written, args.path.display());
    Ok(ExitCode::SUCCESS)
}

fn read_whole(bridge: &Bridge, path: &Path, out: &mut dyn Write) -> CommandResult<u64> {
    let req = BridgeRequest::ReadFile { path: path.to_path_buf() };
    let bytes = match check(bridge.call(req)?)? {
        BridgeResponse::Bytes(bytes) => bytes,
        other => return Err(unexpected("read-file", &other)),
    };

    out.write_all(&bytes).context("failed to write output")?;
    Ok(bytes.len() as u64)
}

fn read_chunked(
    bridge: &Bridge,
    path: &Path,
    len: u32,
    out: &mut dyn Write,
) -> CommandResult<u64> {
    let mut offset = 0u64;

    loop {
        let req = BridgeRequest::ReadFileChunk {
            path: path.to_path_buf(),
            offset,
            len,
        };
        let chunk = match check(bridge.call(req)?)? {
            BridgeResponse::Chunk(chunk) => chunk,
            other => return Err(unexpected("read-file-chunk", &other)),
        };

        if chunk.offset != offset {
            bail!("chunk for offset {} came back at {}", offset, chunk.offset);
        }

        out.write_all(&chunk.data).context("failed to write output")?;
        offset += chunk.data.len() as u64;

        if chunk.eof {
            return Ok(offset);
        }
        if chunk.data.is_empty() {
            // File shrank underneath us.
            bail!("{} ended early at byte {}", path.display(), offset);
        }
    }
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
