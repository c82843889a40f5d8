//! Object store served over HTTP.
//!
//! Protocol, relative to the configured endpoint:
//!
//! - `PUT {endpoint}/{bucket}/{path}` stores the request body
//! - `GET {endpoint}/{bucket}/{path}` returns the object
//! - `DELETE {endpoint}/{bucket}/{path}` removes it
//! - `GET {endpoint}/{bucket}?prefix={prefix}` returns a JSON array of
//!   `{path, lastModified, size}` entries
//!
//! When a token is configured it is sent as `Authorization: Bearer <token>`.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::cloud::error::CloudError;
use crate::cloud::store::{ObjectInfo, ObjectStore};

/// Longest response body quoted in error messages.
const ERROR_BODY_PREVIEW: usize = 200;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListEntry {
    path: String,
    #[serde(default)]
    last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    size: Option<u64>,
}

/// HTTP object store client.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    endpoint: Url,
    bucket: String,
    token: Option<String>,
}

impl HttpStore {
    pub fn new(
        endpoint: &str,
        bucket: &str,
        token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, CloudError> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            CloudError::Unavailable(format!("invalid endpoint URL '{}': {}", endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(CloudError::Unavailable(format!(
                "invalid endpoint URL '{}'",
                endpoint
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("prepdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CloudError::Unavailable(format!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            bucket: bucket.to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        })
    }

    /// `{endpoint}/{bucket}` followed by the segments of `path`.
    fn url_for(&self, path: &str) -> Result<Url, CloudError> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                CloudError::Unavailable(format!("invalid endpoint URL '{}'", self.endpoint))
            })?;
            segments.pop_if_empty().push(&self.bucket);
            segments.extend(path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn send(&self, request: RequestBuilder, path: &str) -> Result<Response, CloudError> {
        let response = self
            .authorized(request)
            .send()
            .map_err(|e| CloudError::Unavailable(e.to_string()))?;
        check_status(response, path)
    }
}

/// Map non-success statuses onto `CloudError`.
fn check_status(response: Response, path: &str) -> Result<Response, CloudError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::NOT_FOUND => Err(CloudError::NotFound(path.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(CloudError::Rejected(format!("access denied (HTTP {})", status.as_u16())))
        }
        _ => {
            let body = response.text().unwrap_or_default();
            let preview: String = body.trim().chars().take(ERROR_BODY_PREVIEW).collect();
            if preview.is_empty() {
                Err(CloudError::Rejected(format!("HTTP {}", status)))
            } else {
                Err(CloudError::Rejected(format!("HTTP {}: {}", status, preview)))
            }
        }
    }
}

impl ObjectStore for HttpStore {
    fn name(&self) -> &'static str {
        "http"
    }

    fn put(&self, path: &str, body: &[u8], content_type: &str) -> Result<(), CloudError> {
        let url = self.url_for(path)?;
        debug!(%url, bytes = body.len(), "PUT object");
        let request = self
            .client
            .put(url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body.to_vec());
        self.send(request, path)?;
        Ok(())
    }

    fn get(&self, path: &str) -> Result<Vec<u8>, CloudError> {
        let url = self.url_for(path)?;
        debug!(%url, "GET object");
        let response = self.send(self.client.get(url), path)?;
        let bytes = response
            .bytes()
            .map_err(|e| CloudError::Unavailable(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    fn list(&self, prefix: &str) -> Result<Vec<ObjectInfo>, CloudError> {
        let mut url = self.url_for("")?;
        url.query_pairs_mut().append_pair("prefix", prefix);
        debug!(%url, "LIST objects");
        let response = self.send(self.client.get(url), prefix)?;
        let entries: Vec<ListEntry> = response
            .json()
            .map_err(|e| CloudError::Rejected(format!("unexpected listing response: {}", e)))?;
        Ok(entries
            .into_iter()
            .filter(|entry| entry.path.starts_with(prefix))
            .map(|entry| ObjectInfo {
                path: entry.path,
                last_modified: entry.last_modified,
                size: entry.size,
            })
            .collect())
    }

    fn remove(&self, path: &str) -> Result<(), CloudError> {
        let url = self.url_for(path)?;
        debug!(%url, "DELETE object");
        self.send(self.client.delete(url), path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Serve one canned response and report the request line and headers.
    fn serve_once(status: &str, body: &str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut head = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or(0);
                }
                head.push_str(&line);
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            head.push_str(&String::from_utf8_lossy(&body));
            reader.get_mut().write_all(response.as_bytes()).unwrap();
            tx.send(head).unwrap();
        });
        (endpoint, rx)
    }

    fn store(endpoint: &str, token: Option<&str>) -> HttpStore {
        HttpStore::new(endpoint, "slidesStorage", token, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn urls_include_bucket_and_path() {
        let store = store("https://objects.example/api/", None);
        assert_eq!(
            store.url_for("decks/abc/deck.json").unwrap().as_str(),
            "https://objects.example/api/slidesStorage/decks/abc/deck.json"
        );
    }

    #[test]
    fn invalid_endpoint_is_reported() {
        let err = HttpStore::new("not a url", "b", None, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, CloudError::Unavailable(_)));
    }

    #[test]
    fn put_sends_body_and_bearer_token() {
        let (endpoint, rx) = serve_once("200 OK", "");
        store(&endpoint, Some("s3cret"))
            .put("decks/a/deck.json", b"{\"title\":\"x\"}", "application/json")
            .unwrap();

        let request = rx.recv().unwrap();
        assert!(request.starts_with("PUT /slidesStorage/decks/a/deck.json "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer s3cret"));
        assert!(request.ends_with("{\"title\":\"x\"}"));
    }

    #[test]
    fn missing_object_maps_to_not_found() {
        let (endpoint, _rx) = serve_once("404 Not Found", "");
        let err = store(&endpoint, None).get("decks/a/deck.json").unwrap_err();
        assert!(matches!(err, CloudError::NotFound(p) if p == "decks/a/deck.json"));
    }

    #[test]
    fn forbidden_maps_to_rejected() {
        let (endpoint, _rx) = serve_once("403 Forbidden", "");
        let err = store(&endpoint, None).remove("decks/a/deck.json").unwrap_err();
        assert!(matches!(err, CloudError::Rejected(_)));
    }

    #[test]
    fn listing_is_parsed() {
        let body = r#"[{"path":"decks/a/deck.json","lastModified":"2026-10-01T10:00:00Z","size":12},
                       {"path":"decks/b/deck.json"}]"#;
        let (endpoint, rx) = serve_once("200 OK", body);
        let objects = store(&endpoint, None).list("decks/").unwrap();

        assert!(rx.recv().unwrap().starts_with("GET /slidesStorage?prefix=decks%2F "));
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].size, Some(12));
        assert!(objects[0].last_modified.is_some());
        assert_eq!(objects[1].last_modified, None);
    }

    #[test]
    fn connection_failure_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = store(&endpoint, None).get("decks/a/deck.json").unwrap_err();
        assert!(err.is_transient());
    }
}
