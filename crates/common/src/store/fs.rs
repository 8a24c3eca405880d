use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use cid::Version;

use crate::linked_data::{cid_for, Cid, SHA2_256_CODE};

use super::{BlockStore, StoreError};

/// Block store backed by a local directory.
///  Each block is a file named after its CID string.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `path`, creating the directory if needed
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        tracing::debug!("FsStore::open called with path: {:?}", path);
        tokio::fs::create_dir_all(path).await?;
        Ok(Self {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn block_path(&self, cid: &Cid) -> PathBuf {
        self.root.join(cid.to_string())
    }
}

#[async_trait]
impl BlockStore for FsStore {
    async fn get_block(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        // blocks are only ever written under sha2-256 CIDv1 addresses
        if cid.version() != Version::V1 || cid.hash().code() != SHA2_256_CODE {
            return Err(StoreError::UnsupportedAddress(*cid));
        }

        let bytes = match tokio::fs::read(self.block_path(cid)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StoreError::NotFound(*cid)),
            Err(e) => return Err(e.into()),
        };

        // content must hash back to the address it was requested by
        if cid_for(cid.codec(), &bytes)? != *cid {
            return Err(StoreError::Corrupt(*cid));
        }

        Ok(Bytes::from(bytes))
    }

    async fn has_block(&self, cid: &Cid) -> Result<bool, StoreError> {
        Ok(tokio::fs::try_exists(self.block_path(cid)).await?)
    }

    async fn put_block(&self, codec: u64, bytes: Vec<u8>) -> Result<Cid, StoreError> {
        let cid = cid_for(codec, &bytes)?;
        let path = self.block_path(&cid);
        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, &bytes).await?;
        }
        Ok(cid)
    }
}
