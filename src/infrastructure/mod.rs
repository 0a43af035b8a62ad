//! Infrastructure utilities: filesystem locations.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir, log_file, session_file};
