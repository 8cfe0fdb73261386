//! Command implementations

pub mod add;
pub mod compile;
pub mod completions;
pub mod help;
pub mod init;
pub mod install;
pub mod list;
pub mod remove;
pub mod search;
