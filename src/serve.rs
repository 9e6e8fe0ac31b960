//! HTTP server for local viewing
//!
//! `prophet-tracker serve apostles.json` → starts server, opens browser,
//! renders the report. Every request re-reads the artifact, so regenerating
//! `apostles.json` and refreshing the page shows the new numbers; there is
//! no cache to invalidate.

use crate::data::{self, ApostlesData};
use crate::report::{self, PageModel};
use serde::Serialize;
use std::path::PathBuf;
use tiny_http::{Header, Method, Request, Response, Server};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    fn failure(error: String) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Start server, open browser, serve the report until killed.
pub fn start(port: u16, artifact: PathBuf) -> std::io::Result<()> {
    let addr = format!("127.0.0.1:{}", port);
    let server = Server::http(&addr)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let url = format!("http://localhost:{}", port);
    eprintln!("\n\x1b[1;34mProphet Tracker\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Artifact: {}\n", artifact.display());

    let _ = open::that(&url);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &artifact) {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

fn handle_request(request: Request, artifact: &PathBuf) -> std::io::Result<()> {
    let url = request.url().to_string();
    let path = url.split('?').next().unwrap_or("/");
    let method = request.method().clone();

    match (&method, path) {
        // Rendered report page
        (&Method::Get, "/") => match data::load(artifact) {
            Ok(data) => {
                let mut html = Vec::new();
                report::html::write(&mut html, &data)?;
                let response = Response::from_data(html).with_header(html_header());
                request.respond(response)
            }
            Err(e) => {
                let body = format!("Failed to load {}: {}", artifact.display(), e);
                let response = Response::from_string(body).with_status_code(500);
                request.respond(response)
            }
        },

        // Raw artifact, passed through as parsed
        (&Method::Get, "/api/data") => {
            let envelope = match data::load(artifact) {
                Ok(data) => ApiResponse::success(data),
                Err(e) => ApiResponse::<ApostlesData>::failure(e.to_string()),
            };
            respond_json(request, &envelope)
        }

        // Chart-description bundle
        (&Method::Get, "/api/charts") => {
            let envelope = match data::load(artifact) {
                Ok(data) => ApiResponse::success(PageModel::compose(&data)),
                Err(e) => ApiResponse::<PageModel>::failure(e.to_string()),
            };
            respond_json(request, &envelope)
        }

        // 404
        _ => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

fn respond_json<T: Serialize>(request: Request, envelope: &ApiResponse<T>) -> std::io::Result<()> {
    let status = if envelope.ok { 200 } else { 500 };
    let json = serde_json::to_string(envelope)?;
    let response = Response::from_string(json)
        .with_status_code(status)
        .with_header(json_header());
    request.respond(response)
}

fn html_header() -> Header {
    Header::from_bytes(&b"Content-Type"[..], &b"text/html"[..]).unwrap()
}

fn json_header() -> Header {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap()
}
