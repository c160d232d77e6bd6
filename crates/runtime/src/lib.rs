mod config;
pub mod logging;
pub mod session;

pub use config::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_READ_BYTES, DIALOG_ENV, DISPLAY_TIME_FORMAT, LOG_FILE_ENV,
    MAX_CHUNK_LEN, PROGRAM_LOG_LEVEL, PROGRAM_NAME, cache_dir, default_session_path,
    default_socket_path, state_dir,
};

pub use logging::init;
