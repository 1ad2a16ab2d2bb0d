use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::api::{AdminApiClient, ApiError};
use crate::error::FixtureError;
use crate::fixtures;
use crate::table::descriptor::Entity;

/// Whether a page is backed by an embedded dataset or the REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Static,
    Remote,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Static => "static",
            SourceKind::Remote => "remote",
        }
    }
}

/// Where a page's records come from. One call to `fetch` is one load; no
/// implementation retries.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait RecordSource<R>: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn fetch(&self) -> Result<Vec<R>, ApiError>;
}

/// An in-memory list. Cannot fail.
pub struct StaticSource<R> {
    records: Vec<R>,
}

impl<R> StaticSource<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self { records }
    }
}

impl<R: Entity + DeserializeOwned> StaticSource<R> {
    pub fn from_fixture(name: &'static str, yaml: &str) -> Result<Self, FixtureError> {
        fixtures::parse::<R>(name, yaml).map(Self::new)
    }

    pub fn shared(name: &'static str, yaml: &str) -> Result<Arc<dyn RecordSource<R>>, FixtureError> {
        Ok(Arc::new(Self::from_fixture(name, yaml)?))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<R: Clone + Send + Sync> RecordSource<R> for StaticSource<R> {
    fn kind(&self) -> SourceKind {
        SourceKind::Static
    }

    async fn fetch(&self) -> Result<Vec<R>, ApiError> {
        Ok(self.records.clone())
    }
}

/// A list endpoint of the admin API.
pub struct RemoteSource<R> {
    api: AdminApiClient,
    endpoint: &'static str,
    _record: PhantomData<fn() -> R>,
}

impl<R> RemoteSource<R> {
    pub fn new(api: AdminApiClient, endpoint: &'static str) -> Self {
        Self { api, endpoint, _record: PhantomData }
    }
}

impl<R: DeserializeOwned + Send + Sync + 'static> RemoteSource<R> {
    pub fn shared(api: &AdminApiClient, endpoint: &'static str) -> Result<Arc<dyn RecordSource<R>>, FixtureError> {
        Ok(Arc::new(Self::new(api.clone(), endpoint)))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl<R: DeserializeOwned + Send + Sync> RecordSource<R> for RemoteSource<R> {
    fn kind(&self) -> SourceKind {
        SourceKind::Remote
    }

    async fn fetch(&self) -> Result<Vec<R>, ApiError> {
        self.api.list(self.endpoint).await
    }
}
