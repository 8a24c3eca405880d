use crate::linked_data::Cid;
use crate::unixfs::Node;

use super::{BlockStore, StoreError};

/// Prefix accepted (and skipped) at the start of a path
const IPFS_PREFIX: &str = "ipfs";

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("invalid path: {0:?}")]
    InvalidPath(String),
    #[error("invalid cid in path {path:?}: {source}")]
    InvalidCid { path: String, source: cid::Error },
    #[error("no link named {segment:?} under {path:?}")]
    NotFound { path: String, segment: String },
    #[error("block not found: {0}")]
    BlockNotFound(Cid),
    #[error("store error: {0}")]
    Transport(StoreError),
}

impl From<StoreError> for ResolveError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(cid) => ResolveError::BlockNotFound(cid),
            other => ResolveError::Transport(other),
        }
    }
}

/// A node together with the address it was loaded from
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub cid: Cid,
    pub node: Node,
}

/// Walks paths of the form `/ipfs/<cid>/a/b` (or just `<cid>/a/b`)
///  to the node they name.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    store: S,
}

impl<S: BlockStore> Resolver<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch the node stored under `cid`
    pub async fn get(&self, cid: &Cid) -> Result<Node, ResolveError> {
        tracing::debug!(%cid, "fetching node");
        Ok(self.store.get_node(cid).await?)
    }

    /// Resolve a path to the node it names
    pub async fn resolve(&self, path: &str) -> Result<ResolvedNode, ResolveError> {
        let (root, segments) = split_path(path)?;
        tracing::debug!(path, %root, depth = segments.len(), "resolving path");

        let mut cid = root;
        let mut node = self.get(&cid).await?;
        let mut consumed = format!("/{}/{}", IPFS_PREFIX, root);

        for segment in segments {
            let link = node.get_link(segment).ok_or_else(|| ResolveError::NotFound {
                path: consumed.clone(),
                segment: segment.to_string(),
            })?;
            cid = *link.cid();
            node = self.get(&cid).await?;
            consumed.push('/');
            consumed.push_str(segment);
        }

        Ok(ResolvedNode { cid, node })
    }
}

/// Split a path into its root CID and the names to walk from it
fn split_path(path: &str) -> Result<(Cid, Vec<&str>), ResolveError> {
    let mut segments = path.split('/').filter(|s| !s.is_empty()).peekable();

    if segments.peek() == Some(&IPFS_PREFIX) {
        segments.next();
    }

    let root = segments
        .next()
        .ok_or_else(|| ResolveError::InvalidPath(path.to_string()))?;
    let root = root.parse::<Cid>().map_err(|source| ResolveError::InvalidCid {
        path: path.to_string(),
        source,
    })?;

    Ok((root, segments.collect()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::linked_data::{cid_for, LD_RAW_CODEC};
    use crate::store::MemoryStore;
    use crate::unixfs::{Entry, NodeLink};

    #[test]
    fn test_split_path() {
        let cid = cid_for(LD_RAW_CODEC, b"root").unwrap();

        let path = format!("/ipfs/{}/a/b", cid);
        let (root, segments) = split_path(&path).unwrap();
        assert_eq!(root, cid);
        assert_eq!(segments, vec!["a", "b"]);

        let path = format!("{}//a/", cid);
        let (root, segments) = split_path(&path).unwrap();
        assert_eq!(root, cid);
        assert_eq!(segments, vec!["a"]);

        assert!(matches!(split_path("/ipfs/"), Err(ResolveError::InvalidPath(_))));
        assert!(matches!(split_path(""), Err(ResolveError::InvalidPath(_))));
        assert!(matches!(
            split_path("/ipfs/not-a-cid/a"),
            Err(ResolveError::InvalidCid { .. })
        ));
    }

    #[tokio::test]
    async fn test_resolve_walks_links() {
        let store = MemoryStore::new();
        let file = Node::from_entry(&Entry::file(5), vec![]).unwrap();
        let (file_cid, file_len) = store.put_node(&file).await.unwrap();
        let dir = Node::from_entry(
            &Entry::directory(),
            vec![NodeLink::new("hello.txt", file_cid, file_len)],
        )
        .unwrap();
        let (dir_cid, _) = store.put_node(&dir).await.unwrap();

        let resolver = Resolver::new(store);

        let resolved = resolver.resolve(&format!("/ipfs/{}", dir_cid)).await.unwrap();
        assert_eq!(resolved.cid, dir_cid);
        assert_eq!(resolved.node, dir);

        let resolved = resolver
            .resolve(&format!("/ipfs/{}/hello.txt", dir_cid))
            .await
            .unwrap();
        assert_eq!(resolved.cid, file_cid);
        assert_eq!(resolved.node, file);

        let missing = resolver
            .resolve(&format!("/ipfs/{}/nope.txt", dir_cid))
            .await;
        assert!(matches!(
            missing,
            Err(ResolveError::NotFound { segment, .. }) if segment == "nope.txt"
        ));
    }

    #[tokio::test]
    async fn test_resolve_missing_root_block() {
        let resolver = Resolver::new(MemoryStore::new());
        let cid = cid_for(LD_RAW_CODEC, b"absent").unwrap();

        let result = resolver.resolve(&cid.to_string()).await;
        assert!(matches!(result, Err(ResolveError::BlockNotFound(c)) if c == cid));
    }
}
