//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches the mount point and
//! method, dispatches to the fragment handler and writes the access log.

use crate::config::{AppState, StateError};
use crate::handler::fragment::MESSAGE_PREFIX;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Where the fragment handler is mounted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    path: String,
    methods: Option<Vec<Method>>,
}

impl Mount {
    /// Build a mount point; `methods` of `None` accepts every method
    pub fn new(path: &str, methods: Option<&[String]>) -> Result<Self, StateError> {
        let trimmed = path.trim_matches('/');
        let path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}")
        };

        let methods = methods
            .map(|names| {
                names
                    .iter()
                    .map(|name| {
                        Method::from_bytes(name.to_ascii_uppercase().as_bytes())
                            .map_err(|_| StateError::InvalidMethod(name.clone()))
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self { path, methods })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether a request goes to the fragment handler
    ///
    /// The path must equal the mount path or continue it with `/`, compared
    /// ASCII case-insensitively. `HEAD` is accepted wherever `GET` is.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.path_matches(path) && self.method_allowed(method)
    }

    fn path_matches(&self, path: &str) -> bool {
        if self.path == "/" {
            return true;
        }
        let Some(prefix) = path.get(..self.path.len()) else {
            return false;
        };
        prefix.eq_ignore_ascii_case(&self.path) && {
            let rest = &path[self.path.len()..];
            rest.is_empty() || rest.starts_with('/')
        }
    }

    fn method_allowed(&self, method: &Method) -> bool {
        self.methods.as_ref().map_or(true, |methods| {
            methods.contains(method) || (*method == Method::HEAD && methods.contains(&Method::GET))
        })
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = if state.mount.matches(&method, uri.path()) {
        let fragment = Arc::clone(&state.fragment);
        let request_uri = uri.clone();
        let request_method = method.clone();
        // Existence check and rendering block on the filesystem
        match tokio::task::spawn_blocking(move || fragment.handle(&request_method, &request_uri))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                logger::log_error(&format!("Fragment task failed for {uri}: {e}"));
                http::build_failure_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("{MESSAGE_PREFIX}ERROR: {e}"),
                )
            }
        }
    } else {
        http::build_not_mounted_response(&method, uri.path())
    };

    if state.access_log_enabled() {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = http_version(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

const fn http_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
