use std::io;

use tracing::{error, info, warn};

use crate::files::{Resource, Validators, resolve};
use crate::http::conditional::{ConditionalOutcome, evaluate};
use crate::http::mime::content_type_for;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Builds the response for one request.
///
/// Never fails: filesystem errors while serving a GET are logged and
/// answered with 400.
pub async fn handle_request(req: &Request) -> Response {
    let version = &req.version;

    match req.method {
        Method::HEAD => ResponseBuilder::standard(version, StatusCode::Ok)
            .without_content_length()
            .build(),
        Method::GET => match serve_get(req).await {
            Ok(response) => response,
            Err(e) => {
                error!(uri = %req.uri, error = %e, "Failed to read resource");
                Response::bad_request(version)
            }
        },
        Method::UNRECOGNIZED => Response::bad_request(version),
        Method::POST
        | Method::PUT
        | Method::DELETE
        | Method::OPTIONS
        | Method::TRACE
        | Method::CONNECT
        | Method::PATCH => Response::not_implemented(version),
    }
}

async fn serve_get(req: &Request) -> io::Result<Response> {
    let version = &req.version;

    match resolve(&req.root_path, &req.uri).await? {
        Resource::Directory { children } => Ok(ResponseBuilder::standard(version, StatusCode::Ok)
            .header("Content-Type", "text/html")
            .body(directory_listing(&req.uri, &children))
            .build()),

        // If-Match with no current entity still fails the precondition
        Resource::Missing => match evaluate(req, None) {
            ConditionalOutcome::PreconditionFailed => {
                Ok(ResponseBuilder::standard(version, StatusCode::PreconditionFailed).build())
            }
            _ => {
                info!(uri = %req.uri, "File not found");
                Ok(Response::not_found(version))
            }
        },

        Resource::RegularFile {
            path,
            last_modified,
            ..
        } => {
            let content = tokio::fs::read(&path).await?;
            let validators = Validators::new(&content, last_modified);
            Ok(file_response(req, validators, content))
        }
    }
}

fn file_response(req: &Request, validators: Validators, content: Vec<u8>) -> Response {
    let version = &req.version;

    match evaluate(req, Some(&validators)) {
        ConditionalOutcome::PreconditionFailed => {
            ResponseBuilder::standard(version, StatusCode::PreconditionFailed).build()
        }
        ConditionalOutcome::NotModified { etag } => {
            let mut builder = ResponseBuilder::standard(version, StatusCode::NotModified);
            if let Some(etag) = etag {
                builder = builder.header("ETag", etag);
            }
            builder.build()
        }
        ConditionalOutcome::Proceed => {
            let mut builder = ResponseBuilder::standard(version, StatusCode::Ok)
                .header("Last-Modified", validators.last_modified)
                .header("ETag", validators.etag);
            match content_type_for(&req.uri) {
                Some(content_type) => builder = builder.header("Content-Type", content_type),
                None => warn!(uri = %req.uri, "Content-Type not found for extension"),
            }
            builder.body(content).build()
        }
    }
}

/// HTML index with one anchor per child. Paths are written unescaped.
pub fn directory_listing(uri: &str, children: &[String]) -> String {
    let mut html = format!(
        "<html><head><title>Index of {uri}</title></head><body><h1>Index of {uri}</h1><hr><pre>"
    );
    for child in children {
        html.push_str(&format!(" <a href=\"{child}\">{child}</a>\n"));
    }
    html.push_str("<hr></pre></body></html>");
    html
}
