//! Single-shot mode: one JSON-described HTTP request, body returned whole.

mod config;
mod perform;

pub use config::{parse_config, AuthConfig, CookieConfig, RequestConfig};
pub use perform::{perform, HttpResponse};
