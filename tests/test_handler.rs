use conditional_http::files::validators::generate_etag;
use conditional_http::http::handler::{directory_listing, handle_request};
use conditional_http::http::request::{Method, Request, RequestBuilder, Version};
use conditional_http::http::response::{Response, StatusCode};
use conditional_http::http::writer::{parse_response, serialize_response};
use std::path::Path;
use tempfile::TempDir;

const CONTENT: &[u8] = b"<html><body>hello</body></html>";

fn site() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), CONTENT).unwrap();
    std::fs::write(dir.path().join("data.unknownext"), b"raw").unwrap();
    std::fs::create_dir(dir.path().join("docs")).unwrap();
    std::fs::write(dir.path().join("docs").join("a.txt"), b"a").unwrap();
    std::fs::create_dir(dir.path().join("docs").join("nested")).unwrap();
    std::fs::write(dir.path().join("docs").join("nested").join("deep.txt"), b"d").unwrap();
    dir
}

fn request(root: &Path, method: Method, uri: &str, headers: &[(&str, &str)]) -> Request {
    headers
        .iter()
        .fold(
            RequestBuilder::new().method(method).uri(uri).root_path(root),
            |builder, (name, value)| builder.header(name, value),
        )
        .build()
        .unwrap()
}

async fn get(root: &Path, uri: &str, headers: &[(&str, &str)]) -> Response {
    handle_request(&request(root, Method::GET, uri, headers)).await
}

#[tokio::test]
async fn test_get_file_returns_content_and_cache_headers() {
    let dir = site();

    let response = get(dir.path(), "/index.html", &[]).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body.as_deref(), Some(CONTENT));
    assert_eq!(response.header("ETag"), Some(generate_etag(CONTENT).as_str()));
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.header("Server"), Some("SimpleWebServer"));
    assert!(response.header("Last-Modified").is_some());

    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Date",
            "Server",
            "Last-Modified",
            "ETag",
            "Content-Type",
            "Content-Length"
        ]
    );
}

#[tokio::test]
async fn test_get_file_with_unmapped_extension_omits_content_type() {
    let dir = site();

    let response = get(dir.path(), "/data.unknownext", &[]).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), None);
    assert_eq!(response.body.as_deref(), Some(&b"raw"[..]));
}

#[tokio::test]
async fn test_if_none_match_own_etag_is_not_modified() {
    let dir = site();
    let etag = get(dir.path(), "/index.html", &[])
        .await
        .header("ETag")
        .unwrap()
        .to_string();

    let response = get(dir.path(), "/index.html", &[("If-None-Match", etag.as_str())]).await;

    assert_eq!(response.status, StatusCode::NotModified);
    assert_eq!(response.header("ETag"), Some(etag.as_str()));
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_if_match_other_tag_is_precondition_failed() {
    let dir = site();

    let response = get(dir.path(), "/index.html", &[("If-Match", "\"not-it\"")]).await;

    assert_eq!(response.status, StatusCode::PreconditionFailed);
    assert!(response.body.is_none());
}

#[tokio::test]
async fn test_if_match_wildcard_existing_file_proceeds() {
    let dir = site();

    let response = get(dir.path(), "/index.html", &[("If-Match", "*")]).await;

    assert_eq!(response.status, StatusCode::Ok);
}

#[tokio::test]
async fn test_if_match_wildcard_missing_file_is_precondition_failed() {
    let dir = site();

    let response = get(dir.path(), "/gone.html", &[("If-Match", "*")]).await;

    assert_eq!(response.status, StatusCode::PreconditionFailed);
}

#[tokio::test]
async fn test_if_modified_since_exact_string_is_not_modified() {
    let dir = site();
    let last_modified = get(dir.path(), "/index.html", &[])
        .await
        .header("Last-Modified")
        .unwrap()
        .to_string();

    let response = get(
        dir.path(),
        "/index.html",
        &[("If-Modified-Since", last_modified.as_str())],
    )
    .await;

    assert_eq!(response.status, StatusCode::NotModified);
    assert_eq!(response.header("ETag"), None);
}

#[tokio::test]
async fn test_if_modified_since_other_date_proceeds() {
    let dir = site();

    let response = get(
        dir.path(),
        "/index.html",
        &[("If-Modified-Since", "Fri, 1 Jan 2100 00:00:00 +0000")],
    )
    .await;

    assert_eq!(response.status, StatusCode::Ok);
}

#[tokio::test]
async fn test_missing_file_is_not_found() {
    let dir = site();

    let response = get(dir.path(), "/missing.html", &[]).await;

    assert_eq!(response.status, StatusCode::NotFound);
    let body = String::from_utf8(response.body.unwrap()).unwrap();
    assert!(body.contains("Not Found"));
}

#[tokio::test]
async fn test_directory_lists_immediate_children() {
    let dir = site();

    let response = get(dir.path(), "/docs", &[]).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    let body = String::from_utf8(response.body.unwrap()).unwrap();
    assert!(body.contains("<title>Index of /docs</title>"));
    assert_eq!(body.matches("<a href=").count(), 2);
    assert!(body.contains("a.txt"));
    assert!(body.contains("nested"));
    assert!(!body.contains("deep.txt"));
    assert!(!body.contains(".."));
}

#[test]
fn test_directory_listing_markup() {
    let html = directory_listing("/x", &["./x/a".to_string()]);

    assert_eq!(
        html,
        "<html><head><title>Index of /x</title></head><body><h1>Index of /x</h1><hr><pre> <a href=\"./x/a\">./x/a</a>\n<hr></pre></body></html>"
    );
}

#[tokio::test]
async fn test_head_returns_standard_headers_only() {
    let dir = site();

    let response = handle_request(&request(dir.path(), Method::HEAD, "/index.html", &[])).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert!(response.body.is_none());
    let names: Vec<&str> = response.headers.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["Date", "Server"]);
}

#[tokio::test]
async fn test_unrecognized_method_is_bad_request() {
    let dir = site();

    let response = handle_request(&request(dir.path(), Method::UNRECOGNIZED, "/", &[])).await;

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, Some(b"400 Bad Request".to_vec()));
}

#[tokio::test]
async fn test_unsupported_methods_are_not_implemented() {
    let dir = site();

    for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
        let response = handle_request(&request(dir.path(), method, "/index.html", &[])).await;
        assert_eq!(response.status, StatusCode::NotImplemented);
        assert_eq!(response.body, Some(b"501 Not Implemented".to_vec()));
    }
}

#[tokio::test]
async fn test_file_used_as_directory_is_not_found() {
    let dir = site();

    let response = get(dir.path(), "/index.html/child", &[]).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.body, Some(b"404 Not Found".to_vec()));
}

#[tokio::test]
async fn test_filesystem_error_is_bad_request() {
    let dir = site();

    // The OS refuses paths with an interior NUL before touching the disk
    let response = get(dir.path(), "/index\0.html", &[]).await;

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, Some(b"400 Bad Request".to_vec()));
}

#[tokio::test]
async fn test_response_version_follows_request() {
    let dir = site();
    let mut req = request(dir.path(), Method::GET, "/index.html", &[]);
    req.version = Version::Http10;

    let response = handle_request(&req).await;

    assert_eq!(response.version, Version::Http10);
}

#[tokio::test]
async fn test_file_response_round_trips_through_the_wire_format() {
    let dir = site();
    let response = get(dir.path(), "/index.html", &[]).await;

    let bytes = serialize_response(&response);
    let (read_back, consumed) = parse_response(&bytes).unwrap();

    assert_eq!(consumed, bytes.len());
    assert_eq!(read_back.version, response.version);
    assert_eq!(read_back.status, response.status);
    assert_eq!(read_back.headers, response.headers);
    assert_eq!(
        read_back.body.unwrap(),
        std::fs::read(dir.path().join("index.html")).unwrap()
    );
}
