//! Observability: structured logging to a file.

pub mod init;

pub use init::init_tracing;
