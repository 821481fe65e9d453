/**
 * AWS Signature Version 4
 *
 * Header-based SigV4 for single S3 requests. Payloads are not hashed; the
 * caller sends `x-amz-content-sha256: UNSIGNED-PAYLOAD` and passes the same
 * value here.
 */

use chrono::{DateTime, Utc};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

pub const SIGN_V4_ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
pub const SERVICE_TYPE_S3: &str = "s3";
/// `x-amz-date` format
pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const SCOPE_DATE_FORMAT: &str = "%Y%m%d";

/// Access key, secret and region used to sign a request
#[derive(Debug, Clone, Copy)]
pub struct Credentials<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
}

/// The parts of a request that go into the signature
#[derive(Debug)]
pub struct SigningRequest<'a> {
    pub method: &'a str,
    /// URI-encoded absolute path
    pub path: &'a str,
    /// Canonical query string, empty for none
    pub query: &'a str,
    /// Signed headers; names in any case, values untrimmed
    pub headers: &'a [(&'a str, String)],
    pub payload_hash: &'a str,
}

fn hmac_sha256(key: &[u8], data: &str) -> Result<Vec<u8>, InvalidLength> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key)?;
    mac.update(data.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

fn trim_all(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `<date>/<region>/<service>/aws4_request`
pub fn get_scope(region: &str, t: DateTime<Utc>, service_type: &str) -> String {
    format!("{}/{}/{}/aws4_request", t.format(SCOPE_DATE_FORMAT), region, service_type)
}

pub fn get_signing_key(
    secret: &str,
    region: &str,
    t: DateTime<Utc>,
    service_type: &str,
) -> Result<Vec<u8>, InvalidLength> {
    let date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), &t.format(SCOPE_DATE_FORMAT).to_string())?;
    let location = hmac_sha256(&date, region)?;
    let service = hmac_sha256(&location, service_type)?;
    hmac_sha256(&service, "aws4_request")
}

/// Canonical request and the `;`-joined list of signed header names
pub fn canonical_request(request: &SigningRequest<'_>) -> (String, String) {
    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), trim_all(value)))
        .collect();
    headers.sort();

    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{}:{}\n", name, value))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical = [
        request.method,
        request.path,
        request.query,
        &canonical_headers,
        &signed_headers,
        request.payload_hash,
    ]
    .join("\n");

    (canonical, signed_headers)
}

pub fn string_to_sign(canonical_request: &str, t: DateTime<Utc>, scope: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        SIGN_V4_ALGORITHM,
        t.format(AMZ_DATE_FORMAT),
        scope,
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    )
}

/// Build the `Authorization` header value for a request made at `t`
pub fn authorization_header(
    request: &SigningRequest<'_>,
    credentials: Credentials<'_>,
    t: DateTime<Utc>,
) -> Result<String, InvalidLength> {
    let (canonical, signed_headers) = canonical_request(request);
    let scope = get_scope(credentials.region, t, SERVICE_TYPE_S3);
    let to_sign = string_to_sign(&canonical, t, &scope);
    let key = get_signing_key(credentials.secret_key, credentials.region, t, SERVICE_TYPE_S3)?;
    let signature = hex::encode(hmac_sha256(&key, &to_sign)?);

    tracing::debug!("SigV4 canonical request:\n{}", canonical);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        SIGN_V4_ALGORITHM, credentials.access_key, scope, signed_headers, signature
    ))
}
