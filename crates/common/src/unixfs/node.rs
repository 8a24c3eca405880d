use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::linked_data::{BlockEncoded, Cid, DagCborCodec};

use super::entry::{Entry, EntryError};

/**
 * Nodes
 * =====
 * A node is a single block in the DAG: an opaque payload
 *  plus an ordered list of named links to other blocks.
 *  The payload is interpreted by `Entry`; the node does not
 *  care what it holds.
 * Link order is significant. For directories it is the order
 *  children are listed in, for files it is chunk order.
 */

/// A named, sized reference from one node to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLink {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Hash")]
    cid: Cid,
    // Cumulative encoded size of the target block and
    //  everything reachable from it
    #[serde(rename = "Tsize")]
    size: u64,
}

impl NodeLink {
    pub fn new(name: impl Into<String>, cid: Cid, size: u64) -> Self {
        Self {
            name: name.into(),
            cid,
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cid(&self) -> &Cid {
        &self.cid
    }

    /// The link size declared by the parent
    pub fn size(&self) -> u64 {
        self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Node {
    #[serde(rename = "Data")]
    data: Bytes,
    #[serde(rename = "Links")]
    links: Vec<NodeLink>,
}

impl BlockEncoded<DagCborCodec> for Node {}

impl Node {
    pub fn new(data: impl Into<Bytes>, links: Vec<NodeLink>) -> Self {
        Self {
            data: data.into(),
            links,
        }
    }

    /// Build a node whose payload is the given entry
    pub fn from_entry(entry: &Entry, links: Vec<NodeLink>) -> Result<Self, EntryError> {
        Ok(Self::new(entry.to_bytes()?, links))
    }

    pub fn links(&self) -> &[NodeLink] {
        &self.links
    }

    /// Decode the payload as a filesystem entry
    pub fn entry(&self) -> Result<Entry, EntryError> {
        Entry::from_bytes(&self.data)
    }

    /// First link carrying the given name
    pub fn get_link(&self, name: &str) -> Option<&NodeLink> {
        self.links.iter().find(|link| link.name == name)
    }
}
