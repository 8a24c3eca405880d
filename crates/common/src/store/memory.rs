use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;

use crate::linked_data::{cid_for, Cid};

use super::{BlockStore, StoreError};

/// In-memory block store keyed by CID
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<HashMap<Cid, Bytes>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Drop a block, e.g. to simulate a store that is missing data
    pub fn remove(&self, cid: &Cid) -> Option<Bytes> {
        self.inner.write().remove(cid)
    }
}

#[async_trait]
impl BlockStore for MemoryStore {
    async fn get_block(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        self.inner
            .read()
            .get(cid)
            .cloned()
            .ok_or(StoreError::NotFound(*cid))
    }

    async fn has_block(&self, cid: &Cid) -> Result<bool, StoreError> {
        Ok(self.inner.read().contains_key(cid))
    }

    async fn put_block(&self, codec: u64, bytes: Vec<u8>) -> Result<Cid, StoreError> {
        let cid = cid_for(codec, &bytes)?;
        self.inner.write().insert(cid, Bytes::from(bytes));
        Ok(cid)
    }
}
