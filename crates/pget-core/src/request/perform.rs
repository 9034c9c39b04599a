//! Maps a request description onto one curl easy handle.

use std::time::Duration;

use anyhow::{Context, Result};
use curl::easy::{Auth, Easy, List};

use super::config::{AuthConfig, RequestConfig};

/// Response of a single-shot request. The body is buffered in memory; this
/// path handles one request at a time.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs `config` on a fresh handle. Transport failures are errors; HTTP
/// error statuses are not, the response is returned as received.
pub fn perform(config: &RequestConfig) -> Result<HttpResponse> {
    let mut easy = Easy::new();
    easy.url(&config.url)
        .with_context(|| format!("invalid url {}", config.url))?;
    if config.method != "GET" {
        easy.custom_request(&config.method)?;
    }

    // One list carries both custom headers and the bearer token:
    // CURLOPT_HTTPHEADER replaces the previous list, it does not append.
    let mut headers = List::new();
    for (name, value) in &config.headers {
        headers.append(&format!("{}: {}", name, value))?;
    }
    match &config.auth {
        Some(AuthConfig::Basic { username, password }) => {
            easy.http_auth(Auth::new().basic(true))?;
            easy.username(username)?;
            easy.password(password)?;
        }
        Some(AuthConfig::Bearer { token }) => {
            headers.append(&format!("Authorization: Bearer {}", token))?;
        }
        None => {}
    }
    easy.http_headers(headers)?;

    if let Some(data) = &config.data {
        let body = serde_json::to_vec(data).context("cannot serialize request data")?;
        easy.post_fields_copy(&body)?;
    }
    if let Some(cookies) = &config.cookies {
        if let Some(path) = &cookies.load {
            easy.cookie_file(path)?;
        }
        if let Some(path) = &cookies.save {
            easy.cookie_jar(path)?;
        }
    }
    easy.follow_location(config.follow_redirects)?;
    easy.max_redirections(config.max_redirects)?;
    easy.timeout(Duration::from_secs(config.timeout))?;
    easy.verbose(config.verbose)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("request to {} failed", config.url))?;
    }
    let status = easy.response_code()?;

    Ok(HttpResponse { status, body })
}
