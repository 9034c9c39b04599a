//! CLI command handlers. Each command is in its own file.

mod batch;
mod request;

pub use batch::run_batch;
pub use request::run_request;
