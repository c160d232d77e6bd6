mod error;
mod format;
mod metadata;
mod read;
mod record;
mod walker;

pub use error::{FsError, FsResult};
pub use format::{format_size, format_timestamp};
pub use metadata::{extract_record, file_info, files_info};
pub use read::{read_chunk, read_file};
pub use record::{FileChunk, FileInfo, FileRecord, FormattedTimestamps, Timestamps};
pub use walker::{ScanOptions, SymlinkPolicy, walk_folder};
