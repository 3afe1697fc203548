//! CLI subcommands.

pub mod all;
pub mod build;
pub mod bundle;
pub mod favicons;
pub mod init;
pub mod merge;
