//! reqwest implementation of [`HttpTransport`].
//!
//! `ReqwestTransport` wraps a `reqwest::Client` and performs exactly one
//! GET per call.  There is no retry: a failed attempt is reported as a
//! [`TransportError`] and classified by the caller.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Url};

use ab_domain::error::{Error, Result};

use crate::transport::{HttpRequest, HttpResponse, HttpTransport, TransportError};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Transport
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A reqwest-based transport for the Actionbook API.
///
/// The per-request timeout comes from each [`HttpRequest`], so one client
/// serves both the 30 s tool calls and the 10 s credential probe.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

const MAX_REDIRECTS: usize = 5;

impl ReqwestTransport {
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent)
            .redirect(same_origin_redirects())
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { http })
    }
}

/// Follow redirects only while they stay on the origin of the first
/// request.  The API key header is not stripped by reqwest, so a redirect
/// to another origin is returned to the caller as a plain 3xx instead.
fn same_origin_redirects() -> Policy {
    Policy::custom(|attempt| {
        let stays = attempt
            .previous()
            .first()
            .is_some_and(|first| same_origin(first, attempt.url()));
        if !stays {
            attempt.stop()
        } else if attempt.previous().len() > MAX_REDIRECTS {
            attempt.error("too many redirects")
        } else {
            attempt.follow()
        }
    })
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, req: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        let mut rb = self
            .http
            .get(&req.url)
            .timeout(req.timeout)
            .query(&req.query);
        for (name, value) in &req.headers {
            rb = rb.header(name.as_str(), value.as_str());
        }

        let resp = rb.send().await.map_err(from_reqwest)?;
        let status = resp.status().as_u16();

        // An error status is classified by code alone; a body that fails to
        // arrive must not mask it.
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) if status != 200 => {
                tracing::debug!(status, error = %e, "discarding unreadable error body");
                String::new()
            }
            Err(e) => return Err(from_reqwest(e)),
        };

        Ok(HttpResponse { status, body })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helper
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into a [`TransportError`].
///
/// Timeouts become `Timeout`; connect and send failures become `Connect`
/// with the whole source chain (the top-level message alone rarely says
/// *why*); everything else becomes `Other` tagged with the reqwest error
/// kind.
///
/// The URL is dropped first: it carries the caller's query and area_id,
/// which must not leak into the connection sub-class or the message.
pub fn from_reqwest(e: reqwest::Error) -> TransportError {
    let e = e.without_url();
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() || (e.is_request() && !e.is_builder()) {
        TransportError::Connect(error_chain(&e))
    } else {
        TransportError::Other {
            type_name: format!("reqwest::Error({})", error_kind(&e)),
            message: error_chain(&e),
        }
    }
}

fn error_kind(e: &reqwest::Error) -> &'static str {
    if e.is_builder() {
        "builder"
    } else if e.is_body() {
        "body"
    } else if e.is_decode() {
        "decode"
    } else if e.is_redirect() {
        "redirect"
    } else if e.is_status() {
        "status"
    } else {
        "unknown"
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_domain::fault::ConnectClass;
    use mockito::Matcher;
    use std::time::Duration;

    fn request(url: String, timeout: Duration) -> HttpRequest {
        HttpRequest {
            url,
            headers: vec![("Accept".into(), "text/plain".into())],
            query: vec![("query".into(), "login form".into())],
            timeout,
        }
    }

    #[tokio::test]
    async fn returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search_actions")
            .match_query(Matcher::UrlEncoded("query".into(), "login form".into()))
            .match_header("accept", "text/plain")
            .with_status(200)
            .with_body("Area ID: github.com:login:username")
            .create_async()
            .await;

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let resp = transport
            .get(request(
                format!("{}/api/search_actions", server.url()),
                Duration::from_secs(5),
            ))
            .await
            .unwrap();

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "Area ID: github.com:login:username");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_a_response_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/search_actions")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let resp = transport
            .get(request(
                format!("{}/api/search_actions", server.url()),
                Duration::from_secs(5),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status, 503);
    }

    #[tokio::test]
    async fn refused_connection_is_connect_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let err = transport
            .get(request(format!("http://{addr}/"), Duration::from_secs(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)), "{err:?}");
    }

    #[tokio::test]
    async fn refused_connection_detail_ignores_query_text() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let mut req = request(format!("http://{addr}/"), Duration::from_secs(5));
        req.query = vec![(
            "area_id".into(),
            "ssl-labs.com:tls-certificate:dns-lookup-reset-timeout".into(),
        )];

        let detail = match transport.get(req).await.unwrap_err() {
            TransportError::Connect(detail) => detail,
            other => panic!("expected Connect, got {other:?}"),
        };
        assert!(!detail.contains("ssl-labs"), "{detail}");
        assert_eq!(ConnectClass::classify(&detail), ConnectClass::Refused);
    }

    #[tokio::test]
    async fn same_origin_redirect_is_followed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/old")
            .with_status(301)
            .with_header("location", &format!("{}/new", server.url()))
            .create_async()
            .await;
        server
            .mock("GET", "/new")
            .with_status(200)
            .with_body("moved here")
            .create_async()
            .await;

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let mut req = request(format!("{}/old", server.url()), Duration::from_secs(5));
        req.query.clear();
        let resp = transport.get(req).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, "moved here");
    }

    #[tokio::test]
    async fn cross_origin_redirect_is_not_followed() {
        let mut origin = mockito::Server::new_async().await;
        let mut elsewhere = mockito::Server::new_async().await;
        let target = elsewhere
            .mock("GET", "/steal")
            .match_query(mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        origin
            .mock("GET", "/api/search_actions")
            .match_query(mockito::Matcher::Any)
            .with_status(302)
            .with_header("location", &format!("{}/steal", elsewhere.url()))
            .create_async()
            .await;

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let mut req = request(
            format!("{}/api/search_actions", origin.url()),
            Duration::from_secs(5),
        );
        req.headers.push(("X-API-Key".into(), "secret".into()));
        let resp = transport.get(req).await.unwrap();
        assert_eq!(resp.status, 302);
        target.assert_async().await;
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the socket open without ever answering.
            let (_sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let transport = ReqwestTransport::new("test-agent").unwrap();
        let err = transport
            .get(request(format!("http://{addr}/"), Duration::from_millis(200)))
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Timeout);
    }

    #[tokio::test]
    async fn invalid_header_value_is_other_error() {
        let transport = ReqwestTransport::new("test-agent").unwrap();
        let mut req = request("http://127.0.0.1:9/".into(), Duration::from_secs(1));
        req.headers.push(("X-API-Key".into(), "bad\nkey".into()));

        let err = transport.get(req).await.unwrap_err();
        match err {
            TransportError::Other { type_name, .. } => {
                assert_eq!(type_name, "reqwest::Error(builder)")
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }
}
