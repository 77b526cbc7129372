//! Remote object store keyed by content hash.
//!
//! Objects live at `<base>/<bucket>/<sha1-hex>`. The fetcher only needs a
//! full-body GET, so [`ObjectStore`] is a single method; tests swap in an
//! in-memory store.

use crate::checksum::Sha1Digest;
use crate::error::{Error, Result};
use std::str;
use std::time::Duration;
use url::Url;

/// Public bucket host used when no base URL is configured.
pub const DEFAULT_STORE_BASE_URL: &str = "https://storage.googleapis.com/";

/// Where an object lives in the store: a bucket namespace plus the digest of
/// the object's bytes. The local file name plays no part in the lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentAddress {
    pub bucket: String,
    pub digest: Sha1Digest,
}

impl ContentAddress {
    pub fn new(bucket: impl Into<String>, digest: Sha1Digest) -> Self {
        Self {
            bucket: bucket.into(),
            digest,
        }
    }

    /// Append the bucket's segments and the digest to `base`'s path.
    ///
    /// Each bucket segment is percent-encoded, so `#` or `?` in a bucket can
    /// never move the digest into a fragment or query, and an empty bucket
    /// still keeps any prefix already in `base`.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut out = base.clone();
        {
            let mut segments = out.path_segments_mut().map_err(|()| Error::InvalidUrl {
                url: base.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?;
            segments.pop_if_empty();
            segments.extend(self.bucket.split('/').filter(|s| !s.is_empty()));
            segments.push(&self.digest.to_hex());
        }
        Ok(out)
    }
}

pub trait ObjectStore {
    /// Fetch the complete body stored at `address`.
    fn fetch(&self, address: &ContentAddress) -> Result<Vec<u8>>;
}

/// HTTP(S) store backed by libcurl.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpObjectStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut raw = base_url.to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw).map_err(|source| Error::InvalidUrl { url: raw, source })?;
        Ok(Self {
            base,
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(600),
        })
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn get(&self, url: &str) -> Result<Vec<u8>> {
        let transport = |source: curl::Error| Error::Transport {
            url: url.to_string(),
            source,
        };

        let mut body = Vec::new();
        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(transport)?;
        easy.follow_location(true).map_err(transport)?;
        easy.max_redirections(10).map_err(transport)?;
        easy.connect_timeout(self.connect_timeout).map_err(transport)?;
        easy.timeout(self.timeout).map_err(transport)?;

        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(transport)?;
            transfer.perform().map_err(transport)?;
        }

        let status = easy.response_code().map_err(transport)?;
        if !(200..300).contains(&status) {
            return Err(Error::Http {
                url: url.to_string(),
                status,
            });
        }
        Ok(body)
    }
}

impl ObjectStore for HttpObjectStore {
    fn fetch(&self, address: &ContentAddress) -> Result<Vec<u8>> {
        let url = address.url(&self.base)?;
        tracing::info!(url = %url, "fetching object");
        let body = self.get(url.as_str())?;
        tracing::debug!(url = %url, bytes = body.len(), "object fetched");
        Ok(body)
    }
}
