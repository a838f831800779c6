//! Loopback HTTP transport for the daemon.
//!
//! One blocking accept loop: each request is read fully, handed to
//! [`crate::http_handler::handle_request`], and answered. The daemon binds
//! 127.0.0.1 only, so CORS is about letting extension pages talk to it, not
//! about keeping remote origins out.

use std::io;

use log::{debug, info, warn};
use tiny_http::{Header, Method, Request, Response, Server};

use crate::app::App;
use crate::auth::TOKEN_HEADER;
use crate::http_handler::{handle_request, ApiResponse};

/// Origins the extension and local tooling connect from.
fn origin_allowed(origin: &str) -> bool {
    origin.starts_with("chrome-extension://")
        || origin.starts_with("moz-extension://")
        || origin.starts_with("safari-extension://")
        || origin.starts_with("http://127.0.0.1")
        || origin.starts_with("http://localhost")
        || origin == "null"
}

fn header(field: &str, value: &str) -> io::Result<Header> {
    Header::from_bytes(field, value)
        .map_err(|_| io::Error::new(io::ErrorKind::Other, "invalid header"))
}

fn header_value<'a>(request: &'a Request, field: &'static str) -> Option<&'a str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(field))
        .map(|h| h.value.as_str())
}

fn cors_headers(origin: Option<&str>) -> io::Result<Vec<Header>> {
    let mut headers = vec![
        header(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, PATCH, DELETE, OPTIONS",
        )?,
        header(
            "Access-Control-Allow-Headers",
            &format!("Content-Type, {}", TOKEN_HEADER),
        )?,
        header("Access-Control-Allow-Credentials", "false")?,
    ];
    if let Some(origin) = origin.filter(|o| origin_allowed(o)) {
        headers.push(header("Access-Control-Allow-Origin", origin)?);
    }
    Ok(headers)
}

fn respond(request: Request, api: ApiResponse, origin: Option<&str>) -> io::Result<()> {
    let body = match &api.body {
        Some(v) => v.to_string(),
        None => String::new(),
    };
    let mut response = Response::from_string(body).with_status_code(api.status);
    if api.body.is_some() {
        response.add_header(header("Content-Type", "application/json")?);
    }
    for h in cors_headers(origin)? {
        response.add_header(h);
    }
    let _ = request.respond(response);
    Ok(())
}

/// Runs the accept loop on `127.0.0.1:{port}`. Blocks until the process
/// exits; per-request failures are logged, never fatal.
pub fn serve(app: &App, port: u16) -> io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("bind {}: {}", addr, e)))?;
    info!("listening on http://{}", addr);

    for mut request in server.incoming_requests() {
        let origin = header_value(&request, "Origin").map(|s| s.to_string());

        // Preflight: answer before auth, the extension cannot attach the
        // token header to an OPTIONS request.
        if *request.method() == Method::Options {
            let empty = ApiResponse {
                status: 204,
                body: None,
            };
            if let Err(e) = respond(request, empty, origin.as_deref()) {
                warn!("preflight response failed: {}", e);
            }
            continue;
        }

        let method = request.method().as_str().to_string();
        let url = request.url().to_string();
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p.to_string(), q.to_string()),
            None => (url.clone(), String::new()),
        };
        let token = header_value(&request, TOKEN_HEADER).map(|s| s.to_string());

        let mut body = String::new();
        if let Err(e) = request.as_reader().read_to_string(&mut body) {
            warn!("{} {}: failed to read body: {}", method, path, e);
            continue;
        }

        let api = handle_request(app, &method, &path, &query, token.as_deref(), &body);
        debug!("{} {} -> {}", method, path, api.status);
        if let Err(e) = respond(request, api, origin.as_deref()) {
            warn!("{} {}: response failed: {}", method, path, e);
        }
    }
    Ok(())
}
