//! pget core: a bounded-queue parallel download pipeline plus a single-shot
//! JSON-configured request mode.

pub mod config;
pub mod download;
pub mod logging;
pub mod manifest;
pub mod pipeline;
pub mod pool;
pub mod queue;
pub mod report;
pub mod request;
