use docket_blob::{BlobConfig, S3Config};
use docket_core::{DocError, DocketConfigSnapshot};
use docket_store::PostgresConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3030;
const DEFAULT_POOL_SIZE: u32 = 5;
const DEFAULT_MAX_BYTES: u64 = 100 * 1024 * 1024;

/// Typed process settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PostgresConfig,
    pub s3: S3Config,
    pub blob: BlobConfig,
    pub host: String,
    pub port: u16,
    /// Request body cap. Base64 inflates uploads by a third, so the
    /// default leaves room for a `blob.max_bytes` file plus its JSON.
    pub max_body_bytes: usize,
}

impl Settings {
    /// Fails with a `Configuration` error when `database.url` or
    /// `blob.bucket` is missing.
    pub fn from_snapshot(snapshot: &DocketConfigSnapshot) -> Result<Self, DocError> {
        let database_url = snapshot.require("database.url")?;
        let bucket = snapshot.require("blob.bucket")?;
        // S3_REGION wins; the SDK-wide AWS_REGION is the fallback.
        let region = ["blob.region", "aws.region"]
            .into_iter()
            .filter_map(|key| snapshot.get(key))
            .find(|r| !r.trim().is_empty())
            .unwrap_or(docket_core::config::DEFAULT_REGION);

        let pool_size = snapshot
            .get_u64("database.pool_size")
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(DEFAULT_POOL_SIZE);
        let mut database = PostgresConfig::new(database_url).with_pool_size(pool_size);
        if let Some(timeout) = snapshot.get_duration("database.acquire_timeout") {
            database = database.with_acquire_timeout(timeout);
        }

        let mut s3 = S3Config::new(bucket, region);
        if let Some(endpoint) = snapshot.get("blob.endpoint_url") {
            s3 = s3.with_endpoint_url(endpoint);
        }
        if let (Some(key_id), Some(secret)) = (
            snapshot.get("blob.access_key_id"),
            snapshot.get("blob.secret_access_key"),
        ) {
            s3 = s3.with_credentials(key_id, secret);
        }

        let max_bytes = snapshot.get_u64("blob.max_bytes").unwrap_or(DEFAULT_MAX_BYTES);
        let blob = BlobConfig::new().with_max_blob_bytes(max_bytes);

        let host = snapshot
            .get_string("http.host")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match snapshot.get("http.port") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| DocError::configuration(format!("invalid http.port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let default_body = usize::try_from(max_bytes / 3 * 4 + 64 * 1024).unwrap_or(usize::MAX);
        let max_body_bytes = snapshot
            .get_usize("http.max_body_bytes")
            .unwrap_or(default_body);

        Ok(Self {
            database,
            s3,
            blob,
            host,
            port,
            max_body_bytes,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
