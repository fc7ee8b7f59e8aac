//! I/O helpers for a publish run.

pub mod config;
pub mod env_file;
pub mod process;
pub mod tool;
pub mod venv;
