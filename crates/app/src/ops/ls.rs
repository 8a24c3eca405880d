use std::path::PathBuf;

use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use common::ls::{render, LsError, Lister};
use common::store::{FsStore, StoreError};

use crate::state::{AppState, StateError};

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Paths to list (`/ipfs/<cid>/...` or `<cid>/...`). Read from stdin, one per line, if omitted
    pub paths: Vec<String>,

    /// Print a column header above each listing
    #[arg(short = 'v', long)]
    pub headers: bool,

    /// Emit the listing as JSON
    #[arg(long)]
    pub json: bool,

    /// Block store directory (overrides the config file)
    #[arg(long)]
    pub blocks: Option<PathBuf>,

    /// Arguments, and children per directory, fetched at once (overrides the config file)
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum LsOpError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error("block store error: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ls(#[from] LsError),

    #[error("failed to encode listing: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read paths from stdin: {0}")]
    Io(#[from] std::io::Error),

    #[error("block store not found at {0}")]
    MissingBlocks(PathBuf),
}

/// Non-empty, trimmed lines from `reader`
pub async fn read_paths<R>(reader: R) -> Result<Vec<String>, std::io::Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut paths = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            paths.push(line.to_string());
        }
    }
    Ok(paths)
}

#[async_trait::async_trait]
impl crate::op::Op for Ls {
    type Error = LsOpError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        // An explicit --blocks makes the config directory optional
        let state = match AppState::load(ctx.config_path.clone()) {
            Ok(state) => Some(state),
            Err(StateError::NotInitialized) if self.blocks.is_some() => None,
            Err(e) => return Err(e.into()),
        };

        let blocks_path = match (&self.blocks, &state) {
            (Some(path), _) => path.clone(),
            (None, Some(state)) => state.blocks_path.clone(),
            (None, None) => return Err(StateError::NotInitialized.into()),
        };
        let concurrency = self
            .concurrency
            .or(state.as_ref().map(|s| s.config.concurrency))
            .unwrap_or(common::ls::DEFAULT_CONCURRENCY);

        if !blocks_path.is_dir() {
            return Err(LsOpError::MissingBlocks(blocks_path));
        }

        let paths = if self.paths.is_empty() {
            read_paths(BufReader::new(tokio::io::stdin())).await?
        } else {
            self.paths.clone()
        };

        tracing::info!(
            blocks = %blocks_path.display(),
            concurrency,
            paths = paths.len(),
            "listing"
        );

        let store = FsStore::open(&blocks_path).await?;
        let output = Lister::new(store)
            .with_concurrency(concurrency)
            .build(&paths)
            .await?;

        if self.json {
            Ok(serde_json::to_string_pretty(&output)?)
        } else {
            Ok(render(&output, self.headers))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{Op, OpContext};
    use common::testkit::DagBuilder;
    use tempfile::TempDir;

    fn ls(paths: Vec<String>, blocks: PathBuf) -> Ls {
        Ls {
            paths,
            headers: false,
            json: false,
            blocks: Some(blocks),
            concurrency: None,
        }
    }

    #[tokio::test]
    async fn test_read_paths_skips_blank_lines() {
        let input: &[u8] = b"/ipfs/a\n\n  \n  b/c  \n";
        let paths = read_paths(input).await.unwrap();
        assert_eq!(paths, vec!["/ipfs/a".to_string(), "b/c".to_string()]);
    }

    #[tokio::test]
    async fn test_ls_with_explicit_blocks() {
        let temp = TempDir::new().unwrap();
        let blocks = temp.path().join("blocks");
        let dag = DagBuilder::new(FsStore::open(&blocks).await.unwrap());
        let file = dag.file(42).await.unwrap();
        let root = dag.directory(vec![("file.txt", file)]).await.unwrap();

        // no config dir at all
        let ctx = OpContext::new(Some(temp.path().join("missing")));
        let output = ls(vec![root.cid.to_string()], blocks)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(output, format!("{}  File  42  file.txt\n", file.cid));
    }

    #[tokio::test]
    async fn test_ls_json() {
        let temp = TempDir::new().unwrap();
        let blocks = temp.path().join("blocks");
        let dag = DagBuilder::new(FsStore::open(&blocks).await.unwrap());
        let file = dag.file(7).await.unwrap();
        let path = format!("/ipfs/{}", file.cid);

        let mut op = ls(vec![path.clone()], blocks);
        op.json = true;
        let ctx = OpContext::new(Some(temp.path().join("missing")));
        let output = op.execute(&ctx).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["Objects"][0]["Argument"], path.as_str());
        assert_eq!(value["Objects"][0]["Links"][0]["Size"], 7);
    }

    #[tokio::test]
    async fn test_ls_uses_config_blocks() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("ufs");
        let state = AppState::init(Some(dir.clone()), None).unwrap();
        let dag = DagBuilder::new(FsStore::open(&state.blocks_path).await.unwrap());
        let file = dag.file(3).await.unwrap();

        let op = Ls {
            paths: vec![file.cid.to_string()],
            headers: true,
            json: false,
            blocks: None,
            concurrency: Some(1),
        };
        let output = op.execute(&OpContext::new(Some(dir))).await.unwrap();

        let expected = format!(
            "Hash{}  Type  Size  Name\n{}  File  3     {}\n",
            " ".repeat(file.cid.to_string().len() - 4),
            file.cid,
            file.cid
        );
        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn test_ls_missing_blocks_dir() {
        let temp = TempDir::new().unwrap();
        let op = ls(vec!["x".to_string()], temp.path().join("nope"));
        let ctx = OpContext::new(Some(temp.path().join("missing")));
        assert!(matches!(
            op.execute(&ctx).await,
            Err(LsOpError::MissingBlocks(_))
        ));
    }

    #[tokio::test]
    async fn test_ls_uninitialized_without_blocks() {
        let temp = TempDir::new().unwrap();
        let op = Ls {
            paths: vec!["x".to_string()],
            headers: false,
            json: false,
            blocks: None,
            concurrency: None,
        };
        let ctx = OpContext::new(Some(temp.path().join("missing")));
        assert!(matches!(
            op.execute(&ctx).await,
            Err(LsOpError::State(StateError::NotInitialized))
        ));
    }
}
