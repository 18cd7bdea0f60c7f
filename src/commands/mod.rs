//! CLI commands

pub mod clean;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
pub mod slugs;
