//! Block storage and path resolution
//!
//! [`BlockStore`] is the only seam to wherever blocks actually live.
//!  Two implementations ship with the crate: [`MemoryStore`] for tests and
//!  [`FsStore`], one file per block in a local directory.
//! [`Resolver`] walks `/ipfs/<cid>/a/b` style paths over any store.

mod fs;
mod memory;
mod resolver;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::linked_data::{BlockEncoded, Cid, CodecError, LD_DAG_CBOR_CODEC};
use crate::unixfs::Node;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use resolver::{ResolveError, ResolvedNode, Resolver};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("block not found: {0}")]
    NotFound(Cid),
    #[error("block {0} does not match its address")]
    Corrupt(Cid),
    #[error("unsupported address {0}: only sha2-256 CIDv1 blocks are stored")]
    UnsupportedAddress(Cid),
    #[error("block store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

#[async_trait]
pub trait BlockStore: Send + Sync + Debug {
    /// Fetch the raw bytes of a block
    async fn get_block(&self, cid: &Cid) -> Result<Bytes, StoreError>;

    async fn has_block(&self, cid: &Cid) -> Result<bool, StoreError>;

    /// Store an encoded block, returning its address
    async fn put_block(&self, codec: u64, bytes: Vec<u8>) -> Result<Cid, StoreError>;

    /// Fetch and decode a DAG node
    async fn get_node(&self, cid: &Cid) -> Result<Node, StoreError> {
        let bytes = self.get_block(cid).await?;
        Ok(Node::decode(&bytes)?)
    }

    /// Encode and store a DAG node. Returns the address along
    ///  with the encoded length of the block.
    async fn put_node(&self, node: &Node) -> Result<(Cid, u64), StoreError> {
        let bytes = node.encode()?;
        let len = bytes.len() as u64;
        let cid = self.put_block(LD_DAG_CBOR_CODEC, bytes).await?;
        Ok((cid, len))
    }
}

#[async_trait]
impl<T: BlockStore + ?Sized> BlockStore for Arc<T> {
    async fn get_block(&self, cid: &Cid) -> Result<Bytes, StoreError> {
        (**self).get_block(cid).await
    }

    async fn has_block(&self, cid: &Cid) -> Result<bool, StoreError> {
        (**self).has_block(cid).await
    }

    async fn put_block(&self, codec: u64, bytes: Vec<u8>) -> Result<Cid, StoreError> {
        (**self).put_block(codec, bytes).await
    }
}
