use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use filedock_fs::{ScanOptions, SymlinkPolicy};
use filedock_host::{HostOptions, PickerKind};
use filedock_protocol::codec::MAX_BYTES_PAYLOAD;
use filedock_runtime::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_READ_BYTES, default_socket_path};

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    // Unix domain socket path
    pub socket_path: PathBuf,
    pub host: HostOptions,
    // Explicit dialog choice; None defers to the environment
    pub dialog: Option<PickerKind>,
}

#[derive(Debug, Parser)]
#[command(name = "filedock-daemon", about = "filedock filesystem bridge")]
pub struct Cli {
    /// Path to Unix domain socket (optional override)
    #[arg(long)]
    pub socket_path: Option<PathBuf>,

    /// Deepest folder level a scan may enter; 0 disables the limit
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Skip symbolic links during folder scans instead of following them
    #[arg(long)]
    pub no_follow_symlinks: bool,

    /// Largest file returned by a whole-file read; 0 allows anything that fits in one reply
    #[arg(long, default_value_t = DEFAULT_MAX_READ_BYTES)]
    pub max_read_bytes: u64,

    /// File pickers: native or none
    #[arg(long)]
    pub dialog: Option<PickerKind>,
}

/// `0` on the command line means "no limit".
fn limit<T: PartialEq + Default>(value: T) -> Option<T> {
    if value == T::default() {
        None
    } else {
        Some(value)
    }
}

impl DaemonConfig {
    pub fn from_args(args: &Cli) -> Result<Self> {
        let socket_path = args.socket_path.clone().unwrap_or_else(default_socket_path);

        let symlinks = if args.no_follow_symlinks {
            SymlinkPolicy::Skip
        } else {
            SymlinkPolicy::Follow
        };

        // Whole-file reads travel in a single reply frame.
        let max_read_bytes = match args.max_read_bytes {
            0 => MAX_BYTES_PAYLOAD,
            n if n > MAX_BYTES_PAYLOAD => bail!(
                "--max-read-bytes {n} is larger than one reply can carry ({MAX_BYTES_PAYLOAD} bytes)"
            ),
            n => n,
        };

        Ok(Self {
            socket_path,
            host: HostOptions {
                scan: ScanOptions {
                    symlinks,
                    max_depth: limit(args.max_depth),
                },
                max_read_bytes: Some(max_read_bytes),
            },
            dialog: args.dialog,
        })
    }

    pub fn from_env() -> Result<Self> {
        let args = Cli::parse();
        Self::from_args(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> DaemonConfig {
        let cli = Cli::try_parse_from(argv).expect("valid args");
        DaemonConfig::from_args(&cli).expect("config")
    }

    #[test]
    fn defaults_follow_links_with_limits() {
        let cfg = parse(&["filedock-daemon"]);

        assert_eq!(cfg.socket_path, default_socket_path());
        assert_eq!(cfg.host, HostOptions::default());
        assert!(cfg.dialog.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "filedock-daemon",
            "--socket-path",
            "/tmp/fd.sock",
            "--max-depth",
            "3",
            "--no-follow-symlinks",
            "--max-read-bytes",
            "1024",
            "--dialog",
            "none",
        ]);

        assert_eq!(cfg.socket_path, PathBuf::from("/tmp/fd.sock"));
        assert_eq!(cfg.host.scan.max_depth, Some(3));
        assert_eq!(cfg.host.scan.symlinks, SymlinkPolicy::Skip);
        assert_eq!(cfg.host.max_read_bytes, Some(1024));
        assert_eq!(cfg.dialog, Some(PickerKind::Headless));
    }

    #[test]
    fn zero_lifts_limits_up_to_frame_size() {
        let cfg = parse(&["filedock-daemon", "--max-depth", "0", "--max-read-bytes", "0"]);

        assert_eq!(cfg.host.scan.max_depth, None);
        assert_eq!(cfg.host.max_read_bytes, Some(MAX_BYTES_PAYLOAD));
    }

    #[test]
    fn read_limit_above_frame_size_is_rejected() {
        let too_big = (MAX_BYTES_PAYLOAD + 1).to_string();
        let cli = Cli::try_parse_from(["filedock-daemon", "--max-read-bytes", too_big.as_str()])
            .expect("valid args");

        let err = DaemonConfig::from_args(&cli).expect_err("limit over frame size");
        assert!(err.to_string().contains("--max-read-bytes"), "got {err}");

        let at_limit = MAX_BYTES_PAYLOAD.to_string();
        let cfg = parse(&["filedock-daemon", "--max-read-bytes", at_limit.as_str()]);
        assert_eq!(cfg.host.max_read_bytes, Some(MAX_BYTES_PAYLOAD));
    }

    #[test]
    fn unknown_dialog_is_rejected() {
        assert!(Cli::try_parse_from(["filedock-daemon", "--dialog", "zenity"]).is_err());
    }
}
