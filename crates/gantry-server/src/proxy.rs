//! Downstream forwarding client.
//!
//! One `reqwest` client shared by every handler. Each proxied call is a
//! single best-effort forward: no retries, no batching; the only timeout
//! is the per-request one configured here.

use gantry_core::UpstreamConfig;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;

use crate::error::GatewayError;

pub struct ProxyClient {
    http: reqwest::Client,
    upstream: UpstreamConfig,
}

impl ProxyClient {
    pub fn new(upstream: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(upstream.timeout_secs))
            .build()?;
        Ok(Self { http, upstream })
    }

    pub fn erp_url(&self, path: &str) -> String {
        join(&self.upstream.erp_base_url, path)
    }

    pub fn mes_url(&self, path: &str) -> String {
        join(&self.upstream.mes_base_url, path)
    }

    pub fn drone_url(&self, path: &str) -> String {
        join(&self.upstream.drone_base_url, path)
    }

    /// GET a JSON document.
    pub async fn get_json(&self, url: &str) -> Result<Value, GatewayError> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    /// GET a JSON document with query parameters.
    pub async fn get_json_with_query(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, GatewayError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// POST a JSON body, relaying whatever JSON the upstream answers with
    /// (`null` when it answers with an empty body).
    pub async fn post_json(&self, url: &str, body: &Value) -> Result<Value, GatewayError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// PUT a JSON body; the upstream response body is discarded.
    pub async fn put_json(&self, url: &str, body: &Value) -> Result<(), GatewayError> {
        self.http
            .put(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// DELETE a resource.
    pub async fn delete(&self, url: &str) -> Result<(), GatewayError> {
        self.http.delete(url).send().await?.error_for_status()?;
        Ok(())
    }

    /// GET raw bytes, preserving the upstream status and content type.
    /// Used for the binary image relay.
    pub async fn get_raw(
        &self,
        url: &str,
    ) -> Result<(u16, Option<String>, Vec<u8>), GatewayError> {
        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = response.bytes().await?.to_vec();
        Ok((status, content_type, bytes))
    }

    /// Relay a file upload as a multipart POST, preserving the original
    /// file name. Returns the upstream status and body text.
    pub async fn post_multipart(
        &self,
        url: &str,
        file_name: String,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> Result<(u16, String), GatewayError> {
        let mut part = reqwest::multipart::Part::bytes(data).file_name(file_name);
        if let Some(ct) = content_type {
            part = part
                .mime_str(&ct)
                .map_err(|e| GatewayError::UploadRelay(e.to_string()))?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self.http.post(url).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn join(base: &str, path: &str) -> String {
    format!("{}{}", base.trim_end_matches('/'), path)
}
