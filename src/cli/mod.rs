//! CLI-facing layer
//!
//! `orchestration` holds the operation workflows; the binary maps
//! subcommands and exit codes onto them.

pub mod orchestration;

pub use orchestration::{
    apply_version, decrement_major, decrement_minor, decrement_patch, increment_major,
    increment_minor, increment_patch, print_version, run_operation, ApplyOutcome, Operation,
    OperationOutcome,
};

/// Version printed, nothing went wrong
pub const EXIT_OK: i32 = 0;
/// Operation aborted (unusable store contents or bad configuration)
pub const EXIT_FAILED: i32 = 1;
/// Store could not be read or written; nothing persisted
pub const EXIT_IO_DEGRADED: i32 = 3;
