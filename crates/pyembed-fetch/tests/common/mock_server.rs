//! Mock server helpers for mirror endpoints
//!
//! Paths follow the real mirror layout: installer packages live under
//! `/{version}/{arch}/{package}` and the embeddable bundle under
//! `/{version}/python-{version}-embed-{arch}.zip`.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::builders::embed_bundle;
use super::constants::*;

/// Serve `content` for one installer package
pub async fn mock_package(
    server: &MockServer,
    version: &str,
    arch: &str,
    package: &str,
    content: &[u8],
) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}/{}", version, arch, package)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content))
        .mount(server)
        .await;
}

/// Serve every package in `packages` with content derived from its name
pub async fn mock_packages(server: &MockServer, version: &str, arch: &str, packages: &[&str]) {
    for package in packages {
        mock_package(server, version, arch, package, package.as_bytes()).await;
    }
}

/// Answer one installer package with the given error status
pub async fn mock_failing_package(
    server: &MockServer,
    version: &str,
    arch: &str,
    package: &str,
    status: u16,
) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}/{}", version, arch, package)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serve the embeddable bundle for `version`/`arch`
pub async fn mock_embed_bundle(server: &MockServer, version: &str, arch: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/{}/python-{}-embed-{}.zip",
            version, version, arch
        )))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(embed_bundle()))
        .mount(server)
        .await;
}

/// Number of requests the server has seen so far
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

/// Request paths the server has seen so far, in order
pub async fn request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}
