//! Subcommand implementations.

pub mod get;
pub mod login;
pub mod logout;
pub mod whoami;
