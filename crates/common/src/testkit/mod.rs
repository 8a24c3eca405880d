//! Fixture builder for DAGs
//!
//! Writes files, chunked files and directories into any [`BlockStore`] and
//! hands back the address and declared link size of each, so tests can wire
//! them into parents the same way an importer would.
//!
//! Declared sizes follow the usual convention: encoded bytes of the block,
//! plus the content bytes it stands for (leaves only), plus the declared
//! sizes of everything it links to.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::store::MemoryStore;
//! use common::testkit::DagBuilder;
//!
//! let dag = DagBuilder::new(MemoryStore::new());
//! let readme = dag.file(42).await?;
//! let root = dag.directory(vec![("README.md", readme)]).await?;
//! let path = format!("/ipfs/{}", root.cid);
//! ```

use crate::linked_data::Cid;
use crate::store::{BlockStore, StoreError};
use crate::unixfs::{Entry, EntryError, Node, NodeLink};

#[derive(Debug, thiserror::Error)]
pub enum DagError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Entry(#[from] EntryError),
}

/// Address and declared size of a block written by [`DagBuilder`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DagRef {
    pub cid: Cid,
    pub size: u64,
}

#[derive(Debug, Clone)]
pub struct DagBuilder<S> {
    store: S,
}

impl<S: BlockStore> DagBuilder<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// A single-block file of `len` bytes
    pub async fn file(&self, len: u64) -> Result<DagRef, DagError> {
        self.put(&Entry::file(len), Vec::new(), len).await
    }

    /// A file split into raw chunks of the given lengths
    pub async fn chunked_file(&self, chunks: &[u64]) -> Result<DagRef, DagError> {
        let mut links = Vec::with_capacity(chunks.len());
        for len in chunks {
            let chunk = self.put(&Entry::raw(*len), Vec::new(), *len).await?;
            links.push(NodeLink::new("", chunk.cid, chunk.size));
        }
        self.put(&Entry::chunked_file(chunks.to_vec())?, links, 0).await
    }

    /// A directory with the given children, in the given order
    pub async fn directory(&self, children: Vec<(&str, DagRef)>) -> Result<DagRef, DagError> {
        let links = children
            .into_iter()
            .map(|(name, child)| NodeLink::new(name, child.cid, child.size))
            .collect();
        self.put(&Entry::directory(), links, 0).await
    }

    pub async fn symlink(&self) -> Result<DagRef, DagError> {
        self.put(&Entry::symlink(), Vec::new(), 0).await
    }

    async fn put(
        &self,
        entry: &Entry,
        links: Vec<NodeLink>,
        content_len: u64,
    ) -> Result<DagRef, DagError> {
        let payload = entry.to_bytes()?;
        let linked: u64 = links.iter().map(NodeLink::size).sum();
        let node = Node::new(payload, links);
        let (cid, len) = self.store.put_node(&node).await?;

        Ok(DagRef {
            cid,
            size: len + content_len + linked,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::store::MemoryStore;
    use crate::unixfs::DataType;

    #[tokio::test]
    async fn test_directory_link_sizes_are_cumulative() {
        let dag = DagBuilder::new(MemoryStore::new());
        let a = dag.file(10).await.unwrap();
        let b = dag.file(20).await.unwrap();
        let dir = dag.directory(vec![("a", a), ("b", b)]).await.unwrap();

        assert!(a.size > 10);
        assert!(dir.size > a.size + b.size);

        let node = dag.store().get_node(&dir.cid).await.unwrap();
        assert_eq!(node.links()[0].size(), a.size);
        assert_eq!(node.links()[1].name(), "b");
    }

    #[tokio::test]
    async fn test_chunked_file_records_total() {
        let dag = DagBuilder::new(MemoryStore::new());
        let file = dag.chunked_file(&[4, 4, 2]).await.unwrap();

        let node = dag.store().get_node(&file.cid).await.unwrap();
        let entry = node.entry().unwrap();
        assert_eq!(entry.data_type(), DataType::File);
        assert_eq!(entry.filesize().unwrap(), 10);
        assert_eq!(node.links().len(), 3);
    }
}
