//! CLI command handlers.

mod init;
mod run;
mod urls;

pub use init::run_init;
pub use run::run_mirror;
pub use urls::run_urls;
