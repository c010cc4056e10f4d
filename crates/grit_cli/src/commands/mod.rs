//! CLI commands.

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod init;
pub mod log;
pub mod merge;
pub mod rebase;
pub mod remote;
pub mod rm;
pub mod status;
