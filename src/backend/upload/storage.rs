/**
 * Object Storage Client
 *
 * `ObjectStore` is the seam between the upload relay and the bucket. The
 * production implementation, `S3Client`, sends one SigV4-signed path-style
 * `PUT` per object with `x-amz-acl: public-read`, streaming the body from
 * the spooled file.
 *
 * # Status Handling
 *
 * `put_object` returns the HTTP status of the storage answer. Only 200 is
 * a success; interpreting other statuses is the caller's job. Transport
 * failures (connection refused, DNS, unreadable file) are `StorageError`.
 *
 * No retries.
 */

use std::path::Path;

use async_trait::async_trait;
use axum::http::header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use chrono::Utc;
use reqwest::Url;
use thiserror::Error;

use crate::backend::server::config::S3Config;
use crate::backend::upload::signing::{
    authorization_header, Credentials, SigningRequest, AMZ_DATE_FORMAT, UNSIGNED_PAYLOAD,
};

/// Canned ACL applied to every uploaded object
pub const OBJECT_ACL: &str = "public-read";

/// Object storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Cannot read upload for storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Cannot sign storage request: {0}")]
    Signing(#[from] hmac::digest::InvalidLength),
}

/// One object to store
#[derive(Debug, Clone, Copy)]
pub struct PutObject<'a> {
    /// Object key inside the bucket
    pub key: &'a str,
    /// Local file holding the body
    pub path: &'a Path,
    pub content_type: &'a str,
    pub content_length: u64,
}

/// Destination for uploaded files
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store one object and return the status code of the storage answer
    async fn put_object(&self, object: PutObject<'_>) -> Result<u16, StorageError>;
}

/// S3 (or S3-compatible) bucket client
#[derive(Debug, Clone)]
pub struct S3Client {
    http: reqwest::Client,
    config: S3Config,
}

impl S3Client {
    pub fn new(config: S3Config) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    /// Path-style URL of an object: `<endpoint>/<bucket>/<key>`
    pub fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        let raw = format!(
            "{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.bucket,
            urlencoding::encode(key)
        );
        Url::parse(&raw).map_err(|e| StorageError::InvalidEndpoint(format!("{}: {}", raw, e)))
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            access_key: &self.config.access_key,
            secret_key: &self.config.secret_key,
            region: &self.config.region,
        }
    }
}

/// `Host` header value as the HTTP client will send it
fn host_header(url: &Url) -> Result<String, StorageError> {
    let host = url
        .host_str()
        .ok_or_else(|| StorageError::InvalidEndpoint(url.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(&self, object: PutObject<'_>) -> Result<u16, StorageError> {
        let url = self.object_url(object.key)?;
        let now = Utc::now();
        let amz_date = now.format(AMZ_DATE_FORMAT).to_string();

        let headers = [
            ("content-length", object.content_length.to_string()),
            ("content-type", object.content_type.to_string()),
            ("host", host_header(&url)?),
            ("x-amz-acl", OBJECT_ACL.to_string()),
            ("x-amz-content-sha256", UNSIGNED_PAYLOAD.to_string()),
            ("x-amz-date", amz_date.clone()),
        ];
        let authorization = authorization_header(
            &SigningRequest {
                method: "PUT",
                path: url.path(),
                query: "",
                headers: &headers,
                payload_hash: UNSIGNED_PAYLOAD,
            },
            self.credentials(),
            now,
        )?;

        let file = tokio::fs::File::open(object.path).await?;

        tracing::info!("PUT {} ({} bytes)", url, object.content_length);

        let response = self
            .http
            .put(url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_LENGTH, object.content_length)
            .header(CONTENT_TYPE, object.content_type)
            .header("x-amz-acl", OBJECT_ACL)
            .header("x-amz-content-sha256", UNSIGNED_PAYLOAD)
            .header("x-amz-date", amz_date)
            .body(reqwest::Body::from(file))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Storage rejected {}: {} {}", object.key, status, body);
        }

        Ok(status.as_u16())
    }
}
