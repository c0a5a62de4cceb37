//! Hosted backend client.
//!
//! Speaks the PostgREST dialect exposed by the hosted backend under
//! `/rest/v1/{table}`.

use crate::error::{RemoteError, RemoteResult};
use crate::store::RemoteStore;
use async_trait::async_trait;
use atelier_types::{Collection, RecordId};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Environment variable holding the backend base URL.
pub const REMOTE_URL_ENV: &str = "ATELIER_REMOTE_URL";
/// Environment variable holding the backend API key.
pub const REMOTE_KEY_ENV: &str = "ATELIER_REMOTE_KEY";

const RETURN_REPRESENTATION: &str = "return=representation";
const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=representation";

/// Connection settings for the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Project URL, e.g. `https://example.supabase.co`.
    pub base_url: String,
    /// Anonymous API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Transport timeout for a single request (in seconds).
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

impl RestConfig {
    /// Reads the URL and key from `ATELIER_REMOTE_URL` / `ATELIER_REMOTE_KEY`.
    pub fn from_env() -> RemoteResult<Self> {
        let base_url = std::env::var(REMOTE_URL_ENV)
            .map_err(|_| RemoteError::Config(format!("{REMOTE_URL_ENV} is not set")))?;
        let api_key = std::env::var(REMOTE_KEY_ENV)
            .map_err(|_| RemoteError::Config(format!("{REMOTE_KEY_ENV} is not set")))?;
        Ok(Self {
            base_url,
            api_key,
            ..Self::default()
        })
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
///
/// Authentication failures, timeouts, throttling and server errors mean the
/// backend is unusable right now; every other refusal is a rejection.
pub fn classify_status(status: StatusCode, body: &str) -> RemoteError {
    let code = status.as_u16();
    match code {
        401 | 403 | 408 | 429 => RemoteError::Unavailable(format!("HTTP {code}: {body}")),
        _ if status.is_server_error() => RemoteError::Unavailable(format!("HTTP {code}: {body}")),
        _ => RemoteError::Rejected {
            status: Some(code),
            message: body.to_string(),
        },
    }
}

/// Remote store backed by the hosted backend's REST API.
pub struct RestRemote {
    config: RestConfig,
    client: Client,
}

impl RestRemote {
    /// Creates a new client.
    pub fn new(config: RestConfig) -> RemoteResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(RemoteError::Config("base URL is empty".to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RemoteError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    fn table_url(&self, collection: Collection) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            collection.remote_table()
        )
    }

    fn request(&self, method: Method, collection: Collection) -> RequestBuilder {
        self.client
            .request(method, self.table_url(collection))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
            .header("Accept", "application/json")
    }

    /// Sends a request and turns transport failures and error statuses into
    /// [`RemoteError`]s.
    async fn send(
        &self,
        collection: Collection,
        request: RequestBuilder,
    ) -> RemoteResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("{} request failed: {}", collection, e);
            RemoteError::Unavailable(format!("{collection}: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_status(status, &body);
        warn!("{} request returned {}: {}", collection, status, err);
        Err(err)
    }

    async fn rows(&self, response: Response) -> RemoteResult<Vec<Value>> {
        let status = response.status().as_u16();
        response.json::<Vec<Value>>().await.map_err(|e| RemoteError::Rejected {
            status: Some(status),
            message: format!("malformed response body: {e}"),
        })
    }

    async fn single_row(&self, response: Response, what: &str) -> RemoteResult<Value> {
        self.rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RemoteError::rejected(format!("{what} returned no row")))
    }
}

fn id_filter(id: &RecordId) -> String {
    format!("eq.{id}")
}

#[async_trait]
impl RemoteStore for RestRemote {
    fn provider_name(&self) -> &'static str {
        "Hosted REST backend"
    }

    async fn list(&self, collection: Collection) -> RemoteResult<Vec<Value>> {
        let mut request = self.request(Method::GET, collection).query(&[("select", "*")]);
        if let Some(order) = collection.list_order() {
            request = request.query(&[("order", order)]);
        }

        let response = self.send(collection, request).await?;
        let rows = self.rows(response).await?;
        debug!("Listed {} rows from {}", rows.len(), collection);
        Ok(rows)
    }

    async fn create(&self, collection: Collection, record: Value) -> RemoteResult<Value> {
        let request = self
            .request(Method::POST, collection)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&[record]);

        let response = self.send(collection, request).await?;
        let row = self.single_row(response, "insert").await?;
        debug!("Created row in {}", collection);
        Ok(row)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &RecordId,
        patch: Value,
    ) -> RemoteResult<Value> {
        let request = self
            .request(Method::PATCH, collection)
            .query(&[("id", id_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);

        let response = self.send(collection, request).await?;
        let row = self
            .single_row(response, &format!("update of {collection}/{id}"))
            .await?;
        debug!("Updated {}/{}", collection, id);
        Ok(row)
    }

    async fn upsert(
        &self,
        collection: Collection,
        id: &RecordId,
        record: Value,
    ) -> RemoteResult<Value> {
        let mut record = record;
        match record.as_object_mut() {
            Some(fields) => {
                fields.insert("id".to_string(), Value::String(id.to_string()));
            }
            None => return Err(RemoteError::rejected("upsert payload must be an object")),
        }

        let request = self
            .request(Method::POST, collection)
            .query(&[("on_conflict", "id")])
            .header("Prefer", UPSERT_PREFERENCE)
            .json(&[record]);

        let response = self.send(collection, request).await?;
        let row = self
            .single_row(response, &format!("upsert of {collection}/{id}"))
            .await?;
        debug!("Upserted {}/{}", collection, id);
        Ok(row)
    }

    async fn delete(&self, collection: Collection, id: &RecordId) -> RemoteResult<bool> {
        let request = self
            .request(Method::DELETE, collection)
            .query(&[("id", id_filter(id))]);

        self.send(collection, request).await?;
        debug!("Deleted {}/{}", collection, id);
        Ok(true)
    }
}
