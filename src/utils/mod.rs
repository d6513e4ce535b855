//! Utility Module Implementation
//!
//! Aggregates internal helpers for atomic file output and logging setup.

pub mod io;
pub mod logging;

pub use self::{
    io::{copy_file, ensure_parent_dir, has_allowed_extension, write_atomic, write_bytes_atomic},
    logging::{init_logging, LogLevel, LogTarget},
};
