//! Shared test utilities for listing integration tests
#![allow(dead_code)]

use ::common::store::FsStore;
use ::common::testkit::{DagBuilder, DagRef};
use tempfile::TempDir;

/// Route `tracing` output through the test harness. Set RUST_LOG to see it
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Set up a fresh on-disk block store and a builder over it
pub async fn setup_test_env() -> (DagBuilder<FsStore>, TempDir) {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let store = FsStore::open(&temp_dir.path().join("blocks"))
        .await
        .unwrap();

    (DagBuilder::new(store), temp_dir)
}

/// Build the tree used across tests:
///
/// ```text
/// root/
///   dir/
///     a        (file, 10 bytes)
///     b/       (empty directory)
///   file.txt   (file, 42 bytes)
/// ```
pub async fn sample_tree(dag: &DagBuilder<FsStore>) -> SampleTree {
    let a = dag.file(10).await.unwrap();
    let b = dag.directory(vec![]).await.unwrap();
    let dir = dag.directory(vec![("a", a), ("b", b)]).await.unwrap();
    let file = dag.file(42).await.unwrap();
    let root = dag
        .directory(vec![("dir", dir), ("file.txt", file)])
        .await
        .unwrap();

    SampleTree {
        root,
        dir,
        a,
        b,
        file,
    }
}

pub struct SampleTree {
    pub root: DagRef,
    pub dir: DagRef,
    pub a: DagRef,
    pub b: DagRef,
    pub file: DagRef,
}

impl SampleTree {
    pub fn path(&self, rest: &str) -> String {
        if rest.is_empty() {
            format!("/ipfs/{}", self.root.cid)
        } else {
            format!("/ipfs/{}/{}", self.root.cid, rest)
        }
    }
}
