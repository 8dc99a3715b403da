//! HTTP implementation of [`TankService`]

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use fishrack_core::prelude::*;
use fishrack_core::{Rack, RackId, Tank, TankId};

use crate::payload::{MoveRequest, NewTank, RowConfigRequest, SwapRequest, TankFields};
use crate::service::TankService;
use crate::session::{is_well_formed_token, SessionProvider};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Statuses treated as a rejected session
fn is_auth_status(status: StatusCode) -> bool {
    matches!(status.as_u16(), 401 | 403 | 422)
}

/// REST client for the tank/rack service
#[derive(Clone)]
pub struct HttpTankService {
    client: Client,
    base: Url,
    session: Arc<dyn SessionProvider>,
}

impl std::fmt::Debug for HttpTankService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTankService")
            .field("base", &self.base.as_str())
            .finish()
    }
}

impl HttpTankService {
    /// Create a client for `base_url` (e.g. `http://127.0.0.1:5000/api`)
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<dyn SessionProvider>,
    ) -> Result<Self> {
        let base = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;
        debug!("Tank service at {}", base);
        Ok(Self {
            client,
            base,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::config(format!("Invalid endpoint '{path}': {e}")))
    }

    fn bearer(&self) -> Result<String> {
        match self.session.credential() {
            Some(token) if is_well_formed_token(&token) => Ok(token),
            Some(_) => {
                warn!("Credential is not a well-formed token, not sending request");
                self.session.notify_auth_failure(None);
                Err(Error::AuthFailure { status: None })
            }
            None => {
                warn!("No credential available, not sending request");
                self.session.notify_auth_failure(None);
                Err(Error::AuthFailure { status: None })
            }
        }
    }

    /// Send a request and return the raw response body
    async fn request<B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<String> {
        let token = self.bearer()?;
        let url = self.endpoint(path)?;
        debug!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), url).bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::network(e.to_string()))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::network(e.to_string()))?;

        if is_auth_status(status) {
            self.session.notify_auth_failure(Some(status.as_u16()));
            return Err(Error::AuthFailure {
                status: Some(status.as_u16()),
            });
        }
        if !status.is_success() {
            let message = error_message(&text);
            error!("{} {} failed with {}: {:?}", method, path, status, message);
            return Err(Error::server(status.as_u16(), message));
        }
        Ok(text)
    }

    async fn request_json<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let text = self.request(method, path, body).await?;
        parse_json_body(&text)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut text = raw.trim().to_string();
    if !text.ends_with('/') {
        text.push('/');
    }
    let url = Url::parse(&text).map_err(|e| Error::config(format!("Invalid API URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::config(format!("Invalid API URL '{raw}'")));
    }
    Ok(url)
}

/// Extract the human-readable `message` (or `error`) field of an error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

fn looks_like_html(body: &str) -> bool {
    let head = body.trim_start();
    head.starts_with('<')
}

fn parse_json_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    if looks_like_html(body) {
        return Err(Error::unexpected_response("received HTML instead of JSON"));
    }
    Ok(serde_json::from_str(body)?)
}

/// Decode a rack list, rejecting anything that is not a JSON array
fn parse_rack_list(body: &str) -> Result<Vec<Rack>> {
    let value: Value = parse_json_body(body)?;
    if !value.is_array() {
        return Err(Error::unexpected_response("rack list is not an array"));
    }
    Ok(serde_json::from_value(value)?)
}

impl TankService for HttpTankService {
    async fn list_racks(&self) -> Result<Vec<Rack>> {
        let body = self.request::<()>(Method::GET, "racks", None).await?;
        let racks = parse_rack_list(&body)?;
        debug!("Fetched {} racks", racks.len());
        Ok(racks)
    }

    async fn create_tank(&self, tank: &NewTank) -> Result<Tank> {
        self.request_json(Method::POST, "tanks", Some(tank)).await
    }

    async fn update_tank(&self, id: TankId, fields: &TankFields) -> Result<Tank> {
        self.request_json(Method::PUT, &format!("tanks/{id}"), Some(fields))
            .await
    }

    async fn delete_tank(&self, id: TankId) -> Result<()> {
        self.request::<()>(Method::DELETE, &format!("tanks/{id}"), None)
            .await
            .map(|_| ())
    }

    async fn swap_positions(&self, request: &SwapRequest) -> Result<()> {
        self.request(Method::POST, "tanks/swap-positions", Some(request))
            .await
            .map(|_| ())
    }

    async fn update_row_config(&self, rack: RackId, request: &RowConfigRequest) -> Result<Rack> {
        self.request_json(Method::PUT, &format!("racks/{rack}/row-config"), Some(request))
            .await
    }

    async fn move_tank(&self, id: TankId, request: &MoveRequest) -> Result<()> {
        self.request(Method::PUT, &format!("tanks/{id}/position"), Some(request))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticSession;

    fn service(base: &str, token: Option<&str>) -> HttpTankService {
        HttpTankService::new(
            base,
            DEFAULT_TIMEOUT,
            Arc::new(StaticSession::new(token.map(str::to_string))),
        )
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let svc = service("http://localhost:5000/api", Some("a.b.c"));
        assert_eq!(
            svc.endpoint("tanks/swap-positions").unwrap().as_str(),
            "http://localhost:5000/api/tanks/swap-positions"
        );
        assert_eq!(
            svc.endpoint("/racks").unwrap().as_str(),
            "http://localhost:5000/api/racks"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTankService::new(
            "not a url",
            DEFAULT_TIMEOUT,
            Arc::new(StaticSession::new(None)),
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"message": "Cannot swap tanks of different sizes"}"#).as_deref(),
            Some("Cannot swap tanks of different sizes")
        );
        assert_eq!(error_message(r#"{"error": "nope"}"#).as_deref(), Some("nope"));
        assert_eq!(error_message("<html>"), None);
        assert_eq!(error_message(r#"{"detail": 1}"#), None);
    }

    #[test]
    fn test_rack_list_guard() {
        assert!(matches!(
            parse_rack_list("<!DOCTYPE html><html></html>"),
            Err(Error::UnexpectedResponse { .. })
        ));
        assert!(matches!(
            parse_rack_list(r#"{"racks": []}"#),
            Err(Error::UnexpectedResponse { .. })
        ));
        let racks = parse_rack_list(r#"[{"id": 1, "name": "R", "rows": 2, "columns": 3}]"#).unwrap();
        assert_eq!(racks.len(), 1);
    }

    #[test]
    fn test_auth_statuses() {
        for code in [401, 403, 422] {
            assert!(is_auth_status(StatusCode::from_u16(code).unwrap()));
        }
        assert!(!is_auth_status(StatusCode::BAD_REQUEST));
        assert!(!is_auth_status(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_sending() {
        // Port 9 is discard; the request must never be attempted.
        let svc = service("http://127.0.0.1:9/api", None);
        let err = svc.list_racks().await.unwrap_err();
        assert!(matches!(err, Error::AuthFailure { status: None }));
    }

    #[tokio::test]
    async fn test_malformed_credential_fails_before_sending() {
        let svc = service("http://127.0.0.1:9/api", Some("not-a-jwt"));
        let err = svc.delete_tank(TankId(1)).await.unwrap_err();
        assert!(err.is_auth_failure());
    }
}
