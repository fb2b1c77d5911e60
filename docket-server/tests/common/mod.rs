#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use docket_blob::{
    BlobAdapter, BlobConfig, BlobError, BlobResult, BlobStore, GetResult, MemoryBlobStore,
    ObjectHead, PutResult, SignedUrlBlobStore,
};
use docket_core::{CreateDocument, Document, DocumentChanges, NewDocument};
use docket_server::DocumentsService;
use docket_store::{DocumentStore, MemoryDocumentStore, StoreError, StoreResult};

pub const BUCKET: &str = "docs";

#[derive(Clone, Default)]
pub struct Switch(Arc<AtomicBool>);

impl Switch {
    pub fn on(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
    pub fn off(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
    fn is_on(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Memory blob store with switchable outages.
#[derive(Clone)]
pub struct FlakyBlobStore {
    pub inner: MemoryBlobStore,
    pub fail_put: Switch,
    pub fail_delete: Switch,
    pub fail_sign: Switch,
}

impl FlakyBlobStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryBlobStore::new(BUCKET),
            fail_put: Switch::default(),
            fail_delete: Switch::default(),
            fail_sign: Switch::default(),
        }
    }
}

#[async_trait]
impl BlobStore for FlakyBlobStore {
    async fn put(&self, key: &str, ct: Option<&str>, body: Bytes) -> BlobResult<PutResult> {
        if self.fail_put.is_on() {
            return Err(BlobError::write(key, "simulated blob outage"));
        }
        self.inner.put(key, ct, body).await
    }

    async fn get(&self, key: &str) -> BlobResult<GetResult> {
        self.inner.get(key).await
    }

    async fn head(&self, key: &str) -> BlobResult<ObjectHead> {
        self.inner.head(key).await
    }

    async fn delete(&self, key: &str) -> BlobResult<()> {
        if self.fail_delete.is_on() {
            return Err(BlobError::write(key, "simulated blob outage"));
        }
        self.inner.delete(key).await
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://{BUCKET}.s3.us-east-1.amazonaws.com/{key}")
    }
}

#[async_trait]
impl SignedUrlBlobStore for FlakyBlobStore {
    async fn sign_get(&self, key: &str, expires_in: Duration) -> BlobResult<String> {
        if self.fail_sign.is_on() {
            return Err(BlobError::access(key, "simulated signer outage"));
        }
        self.inner.sign_get(key, expires_in).await
    }
}

/// Memory document store with switchable outages.
#[derive(Clone)]
pub struct FlakyDocumentStore {
    pub inner: MemoryDocumentStore,
    pub fail_create: Switch,
    pub fail_delete: Switch,
}

impl FlakyDocumentStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            fail_create: Switch::default(),
            fail_delete: Switch::default(),
        }
    }
}

#[async_trait]
impl DocumentStore for FlakyDocumentStore {
    async fn create(&self, document: NewDocument) -> StoreResult<Document> {
        if self.fail_create.is_on() {
            return Err(StoreError::Connection("simulated database outage".into()));
        }
        self.inner.create(document).await
    }

    async fn get_by_id(&self, id: &str) -> StoreResult<Document> {
        self.inner.get_by_id(id).await
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<(Vec<Document>, i64)> {
        self.inner.list(limit, offset).await
    }

    async fn update(&self, id: &str, changes: &DocumentChanges) -> StoreResult<Document> {
        self.inner.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        if self.fail_delete.is_on() {
            return Err(StoreError::Backend("simulated database outage".into()));
        }
        self.inner.delete(id).await
    }
}

pub struct Harness {
    pub service: Arc<DocumentsService>,
    pub blobs: FlakyBlobStore,
    pub store: FlakyDocumentStore,
}

pub fn harness() -> Harness {
    harness_with(BlobConfig::default())
}

pub fn harness_with(config: BlobConfig) -> Harness {
    let blobs = FlakyBlobStore::new();
    let store = FlakyDocumentStore::new();
    let service = DocumentsService::new(
        BlobAdapter::new(blobs.clone(), config),
        Arc::new(store.clone()),
        BUCKET,
    );
    Harness {
        service: Arc::new(service),
        blobs,
        store,
    }
}

pub fn upload(file_name: &str, content: &[u8]) -> CreateDocument {
    CreateDocument::new(file_name, STANDARD.encode(content), "application/pdf")
}
