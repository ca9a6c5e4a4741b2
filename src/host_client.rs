// HTTP access to the configured hosts: cluster snapshots and per-container details

use std::time::Duration;

use reqwest::{StatusCode, Url};
use tracing::instrument;

use crate::models::{ContainerDetail, RawSnapshot};
use crate::namespace::HostId;

/// One configured host: its snapshot URL and the namespace prefix derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostTarget {
    pub id: HostId,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostUrlError {
    #[error("invalid host url {url:?}: {reason}")]
    Invalid { url: String, reason: String },
    #[error("host url {0:?} has no hostname")]
    MissingHost(String),
}

impl HostTarget {
    pub fn parse(raw: &str) -> Result<Self, HostUrlError> {
        let url = Url::parse(raw).map_err(|e| HostUrlError::Invalid {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        let id =
            HostId::from_url(&url).ok_or_else(|| HostUrlError::MissingHost(raw.to_string()))?;
        Ok(Self { id, url })
    }

    /// Scheme + authority of the snapshot URL, e.g. `http://10.0.0.2:8080`.
    pub fn base_url(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// `<base>/api/container/<containerID>`; `None` if the URL cannot carry a path.
    pub fn container_url(&self, container_id: &str) -> Option<Url> {
        let mut url = self.url.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .ok()?
            .clear()
            .extend(["api", "container", container_id]);
        Some(url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("{url} responded with {status}")]
    Status { url: String, status: StatusCode },
    #[error("{url} returned an undecodable body: {source}")]
    Decode { url: String, source: reqwest::Error },
    #[error("no container url can be built from {0}")]
    BadUrl(String),
    #[error("http client could not be built: {0}")]
    Client(reqwest::Error),
}

/// Where a cycle's per-host snapshots come from.
pub trait SnapshotSource: Send + Sync + 'static {
    fn fetch_snapshot(
        &self,
        host: &HostTarget,
    ) -> impl Future<Output = Result<RawSnapshot, FetchError>> + Send;
}

pub struct HostClient {
    http: reqwest::Client,
}

impl HostClient {
    /// Every request (snapshot or detail) gives up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { http })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let url_str = url.to_string();
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url_str.clone(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_str,
                status,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|source| FetchError::Decode {
                url: url_str,
                source,
            })
    }

    #[instrument(skip(self), fields(host = %host.id, operation = "fetch_container_detail"))]
    pub async fn fetch_container_detail(
        &self,
        host: &HostTarget,
        container_id: &str,
    ) -> Result<ContainerDetail, FetchError> {
        let url = host
            .container_url(container_id)
            .ok_or_else(|| FetchError::BadUrl(host.url.to_string()))?;
        self.get_json(url).await
    }
}

impl SnapshotSource for HostClient {
    async fn fetch_snapshot(&self, host: &HostTarget) -> Result<RawSnapshot, FetchError> {
        self.get_json(host.url.clone()).await
    }
}
