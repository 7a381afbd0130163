//! AWS Signature Version 4 for PA-API requests.
//!
//! PA-API only ever sees `POST` requests with an empty query string and a
//! JSON body, so the canonical request is built from a fixed shape:
//! method, path, headers and the SHA-256 of the payload.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// AWS Signature V4 algorithm identifier.
pub const AWS_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name PA-API requests are signed for.
pub const PAAPI_SERVICE: &str = "ProductAdvertisingAPI";

/// Credentials and scope used to sign a request.
#[derive(Clone)]
pub struct SigningParams {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub service: String,
}

impl SigningParams {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            service: PAAPI_SERVICE.to_string(),
        }
    }
}

impl std::fmt::Debug for SigningParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningParams")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

/// Derives the signing key:
/// `HMAC(HMAC(HMAC(HMAC("AWS4" + secret, date), region), service), "aws4_request")`.
pub fn derive_signing_key(secret_key: &str, date_stamp: &str, region: &str, service: &str) -> Vec<u8> {
    let k_secret = format!("AWS4{}", secret_key);
    let k_date = hmac_sha256(k_secret.as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    hmac_sha256(&k_service, b"aws4_request")
}

/// `YYYYMMDD'T'HHMMSS'Z'`
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// `YYYYMMDD`
pub fn format_date_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

/// Result of signing: the headers to attach to the outgoing request.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub amz_date: String,
    pub authorization: String,
}

/// Signs a `POST` request.
///
/// `headers` are the headers that take part in the signature; `host` and
/// `x-amz-date` are added here. Header names are lowercased and sorted.
pub fn sign_post(
    path: &str,
    headers: &[(&str, &str)],
    payload: &[u8],
    params: &SigningParams,
    host: &str,
    timestamp: &DateTime<Utc>,
) -> SignedRequest {
    let amz_date = format_datetime(timestamp);
    let date_stamp = format_date_stamp(timestamp);

    let mut canonical: Vec<(String, String)> = headers
        .iter()
        .map(|(name, value)| (name.to_lowercase(), value.trim().to_string()))
        .collect();
    canonical.push(("host".to_string(), host.to_string()));
    canonical.push(("x-amz-date".to_string(), amz_date.clone()));
    canonical.sort_by(|a, b| a.0.cmp(&b.0));

    let canonical_headers: String =
        canonical.iter().map(|(name, value)| format!("{}:{}\n", name, value)).collect();
    let signed_headers =
        canonical.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>().join(";");

    let canonical_request = format!(
        "POST\n{}\n\n{}\n{}\n{}",
        path,
        canonical_headers,
        signed_headers,
        sha256_hex(payload)
    );

    let credential_scope =
        format!("{}/{}/{}/aws4_request", date_stamp, params.region, params.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        AWS_ALGORITHM,
        amz_date,
        credential_scope,
        sha256_hex(canonical_request.as_bytes())
    );

    let signing_key =
        derive_signing_key(&params.secret_key, &date_stamp, &params.region, &params.service);
    let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes()));

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        AWS_ALGORITHM, params.access_key, credential_scope, signed_headers, signature
    );

    SignedRequest { amz_date, authorization }
}
