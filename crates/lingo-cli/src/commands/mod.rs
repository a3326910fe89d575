pub mod clear;
pub mod completions;
pub mod config;
pub mod download;
pub mod get;
pub mod status;
pub mod sync;
pub mod watch;
