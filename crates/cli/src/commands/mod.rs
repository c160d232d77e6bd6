pub mod info;
pub mod pick;
pub mod ping;
pub mod read;
pub mod scan;
pub mod session;

use std::process::ExitCode;

use clap::{Args, Subcommand};
use log::debug;

pub use info::{InfoArgs, StatArgs};
pub use pick::PickArgs;
pub use ping::PingArgs;
pub use read::ReadArgs;
pub use scan::ScanArgs;
pub use session::SessionArgs;

use crate::printer::{ColorChoice, OutputFormat, PrinterConfig};

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a native picker and print the chosen path(s).
    ///
    /// Example:
    ///   filedock pick folder
    ///   filedock pick files --daemon
    Pick(PickArgs),

    /// List every file beneath a folder.
    ///
    /// Example:
    ///   filedock scan ~/notes
    ///   filedock scan --json --no-follow-symlinks /data
    Scan(ScanArgs),

    /// Show detailed information about one path.
    Info(InfoArgs),

    /// Show metadata for several files, in the order given.
    Stat(StatArgs),

    /// Read a file's bytes to stdout or a file.
    Read(ReadArgs),

    /// Show or change the stored login session.
    Session(SessionArgs),

    /// Check that the daemon is up.
    Ping(PingArgs),
}

#[derive(Debug, Args)]
pub struct OutputOptions {
    /// Output results as NDJSON (one JSON object per line)
    #[arg(long)]
    pub json: bool,

    /// When to use colors: auto, always, never
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Suppress the summary line
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }

    pub fn printer_config(&self) -> PrinterConfig {
        let color = match self.color.as_str() {
            "always" => ColorChoice::Always,
            "never" => ColorChoice::Never,
            _ => ColorChoice::Auto,
        };

        PrinterConfig {
            format: self.format(),
            color,
            show_summary: !self.quiet,
        }
    }
}

/// Map a command outcome to an exit code, reporting failures on stderr.
pub fn finish(kind: &str, result: CommandResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            debug!("[{kind}] failed: {e:?}");
            eprintln!("[{kind}] {e:#}");
            ExitCode::from(2)
        }
    }
}
