//! Supabase REST + Storage client.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, StatusCode, Url};
use serde_json::{json, Value};
use tracing::debug;

use super::{named_objects, RowFilter, StorageObject};
use crate::config::BackendConfig;
use crate::error::BackendError;

/// Client for one Supabase project, authenticated with a static key.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client that sends the key as both `apikey` and bearer token
    /// and asks for minimal bodies on writes.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| BackendError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let key = config.api_key.trim();
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(key).map_err(|_| BackendError::InvalidApiKey)?,
        );
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| BackendError::InvalidApiKey)?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert("Prefer", HeaderValue::from_static("return=minimal"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Project URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        let url = format!("{}/{}", self.base_url, path);
        Url::parse(&url).map_err(|e| BackendError::InvalidUrl {
            url,
            reason: e.to_string(),
        })
    }

    fn table_url(&self, table: &str, filter: &RowFilter) -> Result<Url, BackendError> {
        let mut url = self.endpoint(&format!("rest/v1/{table}"))?;
        if let Some((column, predicate)) = filter.query_pair() {
            url.query_pairs_mut().append_pair(column, &predicate);
        }
        Ok(url)
    }

    /// `PATCH /rest/v1/<table>?<filter>` with a JSON body of column values.
    pub async fn patch_rows(
        &self,
        table: &str,
        filter: &RowFilter,
        body: &Value,
    ) -> Result<(), BackendError> {
        let url = self.table_url(table, filter)?;
        debug!(%url, "PATCH");
        let response = self.http.patch(url).json(body).send().await?;
        expect_success(response).await?;
        Ok(())
    }

    /// `DELETE /rest/v1/<table>?<filter>`
    pub async fn delete_rows(&self, table: &str, filter: &RowFilter) -> Result<(), BackendError> {
        let url = self.table_url(table, filter)?;
        debug!(%url, "DELETE");
        let response = self.http.delete(url).send().await?;
        expect_success(response).await?;
        Ok(())
    }

    /// List up to `limit` objects at the root of `bucket`, starting at `offset`.
    pub async fn list_objects(
        &self,
        bucket: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<StorageObject>, BackendError> {
        let url = self.endpoint(&format!("storage/v1/object/list/{bucket}"))?;
        debug!(%url, limit, offset, "POST");
        let response = self
            .http
            .post(url)
            .json(&json!({ "prefix": "", "limit": limit, "offset": offset }))
            .send()
            .await?;
        let response = expect_success(response).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        // `null` lists nothing, same as `[]`
        let entries: Option<Vec<Value>> = serde_json::from_str(&text)?;
        Ok(named_objects(entries.unwrap_or_default()))
    }

    /// Remove the named objects from `bucket` in one request.
    pub async fn delete_objects(&self, bucket: &str, names: &[String]) -> Result<(), BackendError> {
        let url = self.endpoint(&format!("storage/v1/object/{bucket}"))?;
        debug!(%url, count = names.len(), "DELETE");
        let response = self
            .http
            .delete(url)
            .json(&json!({ "prefixes": names }))
            .send()
            .await?;
        expect_success(response).await?;
        Ok(())
    }
}

/// Pass 200 and 204 through; turn anything else into [`BackendError::Status`].
async fn expect_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body,
    })
}
