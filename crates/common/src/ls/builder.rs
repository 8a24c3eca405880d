use futures::stream::{self, StreamExt, TryStreamExt};

use crate::store::{BlockStore, Resolver};
use crate::unixfs::{DataType, Node, NodeLink};

use super::{LsError, LsLink, LsObject, LsOutput};

/// Default width of each concurrent stage (arguments, and children per directory)
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Builds listings against a block store.
///
/// Up to `concurrency` arguments are resolved at once, and each directory
///  argument fetches up to `concurrency` children at once, so as many as
///  `concurrency²` node fetches may be pending. Results always come back in
///  input order. The first failure (by input position) fails the whole
///  listing and drops whatever is still in flight.
#[derive(Debug, Clone)]
pub struct Lister<S> {
    resolver: Resolver<S>,
    concurrency: usize,
}

impl<S: BlockStore> Lister<S> {
    pub fn new(store: S) -> Self {
        Self {
            resolver: Resolver::new(store),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Width of each concurrent stage (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// List every path, in order
    #[tracing::instrument(skip(self, paths), fields(paths = paths.len()))]
    pub async fn build(&self, paths: &[String]) -> Result<LsOutput, LsError> {
        if paths.is_empty() {
            return Err(LsError::NoPaths);
        }

        let pending: Vec<_> = paths.iter().map(|path| self.list_path(path)).collect();
        let objects = stream::iter(pending)
            .buffered(self.concurrency)
            .try_collect::<Vec<_>>()
            .await?;

        Ok(LsOutput { objects })
    }

    async fn list_path(&self, path: &str) -> Result<LsObject, LsError> {
        let resolved = self.resolver.resolve(path).await?;
        let entry = resolved.node.entry()?;

        let links = match entry.data_type() {
            DataType::File => vec![LsLink {
                name: path.to_string(),
                hash: resolved.cid.to_string(),
                size: entry.filesize()?,
                data_type: DataType::File,
            }],
            DataType::Directory => self.list_children(&resolved.node).await?,
            data_type @ (DataType::Raw | DataType::Metadata | DataType::Symlink) => {
                tracing::warn!(path, %data_type, "cannot list entry of this type");
                return Err(LsError::UnsupportedType {
                    path: path.to_string(),
                    data_type,
                });
            }
        };

        Ok(LsObject {
            argument: path.to_string(),
            links,
        })
    }

    async fn list_children(&self, node: &Node) -> Result<Vec<LsLink>, LsError> {
        let pending: Vec<_> = node.links().iter().map(|link| self.list_child(link)).collect();
        stream::iter(pending)
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn list_child(&self, link: &NodeLink) -> Result<LsLink, LsError> {
        let child = self.resolver.get(link.cid()).await?;
        let entry = child.entry()?;
        let data_type = entry.data_type();

        let size = match data_type {
            DataType::File => entry.filesize()?,
            DataType::Directory | DataType::Raw | DataType::Metadata | DataType::Symlink => {
                link.size()
            }
        };

        Ok(LsLink {
            name: link.name().to_string(),
            hash: link.cid().to_string(),
            size,
            data_type,
        })
    }
}
