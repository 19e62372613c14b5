//! Schema registry HTTP client
//!
//! Speaks the two calls the initializer needs: a readiness probe against
//! `GET /subjects` and schema registration via
//! `POST /subjects/{subject}/versions`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::config::InitConfig;
use crate::error::{InitError, SchemaError};

/// Media type the registry expects on write calls
pub const SCHEMA_REGISTRY_CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

/// Identifier recorded when a success response carries no `id`
pub const UNKNOWN_ID: &str = "unknown";

/// Identifier the registry assigned to a schema, kept opaque
pub type SchemaId = String;

/// Registry operations used by a run
pub trait RegistryApi {
    /// Issue one readiness probe. Any HTTP response, whatever its status, counts as reachable.
    fn ping(&self) -> Result<(), SchemaError>;

    /// Register `schema` (raw schema text) under `subject` and return the assigned id.
    fn register(&self, subject: &str, schema: &str) -> Result<SchemaId, SchemaError>;
}

/// Blocking reqwest-backed registry client
pub struct RegistryClient {
    client: Client,
    base_url: String,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl RegistryClient {
    pub fn new(
        base_url: &str,
        probe_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, InitError> {
        Self::build(base_url, probe_timeout, request_timeout, true)
    }

    pub fn from_config(config: &InitConfig) -> Result<Self, InitError> {
        Self::build(
            config.registry_url(),
            config.registry.probe_timeout(),
            config.registry.request_timeout(),
            config.registry.use_proxy,
        )
    }

    fn build(
        base_url: &str,
        probe_timeout: Duration,
        request_timeout: Duration,
        use_proxy: bool,
    ) -> Result<Self, InitError> {
        let mut builder = Client::builder()
            .user_agent(concat!("schema-registry-init/", env!("CARGO_PKG_VERSION")));
        if !use_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| InitError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            probe_timeout,
            request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl RegistryApi for RegistryClient {
    fn ping(&self) -> Result<(), SchemaError> {
        let url = format!("{}/subjects", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()?;
        tracing::debug!(%url, status = %response.status(), "registry responded to probe");
        Ok(())
    }

    fn register(&self, subject: &str, schema: &str) -> Result<SchemaId, SchemaError> {
        let url = format!("{}/subjects/{}/versions", self.base_url, subject);
        let body = serde_json::json!({ "schema": schema }).to_string();

        tracing::debug!(%url, bytes = body.len(), "registering schema");
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, SCHEMA_REGISTRY_CONTENT_TYPE)
            .timeout(self.request_timeout)
            .body(body)
            .send()?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let fallback = match response.error_for_status_ref() {
                Err(e) => e.to_string(),
                Ok(_) => status.to_string(),
            };
            let body = response.text().ok();
            return Err(SchemaError::Http {
                status: status.as_u16(),
                message: extract_error_message(body.as_deref(), &fallback),
            });
        }

        let text = response.text()?;
        parse_schema_id(&text)
    }
}

/// Best-effort message from an error response body.
///
/// Tries the JSON `message` field, then the raw body, then `fallback` (the
/// error's own description) when the body is unreadable or not a JSON object.
/// An empty body is kept as is.
pub fn extract_error_message(body: Option<&str>, fallback: &str) -> String {
    let body = match body {
        Some("") => return String::new(),
        Some(body) => body,
        None => return fallback.to_string(),
    };

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => fallback.to_string(),
    }
}

/// Pull the `id` out of a successful registration response
pub fn parse_schema_id(body: &str) -> Result<SchemaId, SchemaError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| SchemaError::InvalidResponse(e.to_string()))?;

    let map = value.as_object().ok_or_else(|| {
        SchemaError::InvalidResponse(format!("expected a JSON object, got {}", value))
    })?;

    Ok(match map.get("id") {
        None | Some(Value::Null) => UNKNOWN_ID.to_string(),
        Some(Value::String(id)) => id.clone(),
        Some(other) => other.to_string(),
    })
}
