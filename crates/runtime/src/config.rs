use std::path::PathBuf;

pub const PROGRAM_NAME: &str = "filedock";
pub const PROGRAM_LOG_LEVEL: &str = "FILEDOCK_LOG_LEVEL";
/// When set, log lines are appended to this file instead of stderr.
pub const LOG_FILE_ENV: &str = "FILEDOCK_LOG_FILE";
/// Picker override: `native` or `none`.
pub const DIALOG_ENV: &str = "FILEDOCK_DIALOG";

pub const SOCKET_FILE_NAME: &str = "bridge.sock";
pub const SESSION_FILE_NAME: &str = "session.json";

/// Deepest directory level a folder scan will descend into.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest file `read-file` returns as a single buffer. Bigger files are
/// streamed with chunked reads.
pub const DEFAULT_MAX_READ_BYTES: u64 = 256 * 1024 * 1024;

/// Upper bound for a single chunked read.
pub const MAX_CHUNK_LEN: u32 = 8 * 1024 * 1024;

/// Display format for timestamps shown to users, rendered in local time.
pub const DISPLAY_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

pub fn xdg_or_home(xdg_var: &str, home_suffix: &str) -> PathBuf {
    match std::env::var_os(xdg_var) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(home_suffix),
    }
}

/// Runtime directory holding the bridge socket.
pub fn cache_dir() -> PathBuf {
    xdg_or_home("XDG_CACHE_HOME", ".cache").join(PROGRAM_NAME)
}

/// Persistent per-user state (session file).
pub fn state_dir() -> PathBuf {
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME")
        && !xdg_state.is_empty()
    {
        return PathBuf::from(xdg_state).join(PROGRAM_NAME);
    }

    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .map(|p| p.join(PROGRAM_NAME))
        .unwrap_or_else(|| xdg_or_home("XDG_STATE_HOME", ".local/state").join(PROGRAM_NAME))
}

pub fn default_socket_path() -> PathBuf {
    cache_dir().join(SOCKET_FILE_NAME)
}

pub fn default_session_path() -> PathBuf {
    state_dir().join(SESSION_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
