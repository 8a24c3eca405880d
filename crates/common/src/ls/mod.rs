//! Listing directory-like entries
//!
//! Given one or more paths, [`Lister::build`] resolves each one, reads it as
//!  a UnixFS entry and produces an [`LsOutput`]: one [`LsObject`] per
//!  argument, holding the immediate children of a directory or a single
//!  synthetic row for a file. [`render`] turns that into an aligned table.
//!
//! # Sizes
//!
//! - File rows report the file's logical length, read from the file's own
//!   entry (so chunked files report their full length)
//! - Every other row reports the link size declared by the parent

mod builder;
mod render;

use serde::{Deserialize, Serialize};

use crate::store::ResolveError;
use crate::unixfs::{DataType, EntryError};

pub use builder::{Lister, DEFAULT_CONCURRENCY};
pub use render::{render, HEADER};

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("at least one path is required")]
    NoPaths,
    #[error("failed to resolve path: {0}")]
    Resolve(#[from] ResolveError),
    #[error("failed to decode entry: {0}")]
    Decode(#[from] EntryError),
    #[error("unrecognized type: {data_type} ({path})")]
    UnsupportedType { path: String, data_type: DataType },
}

/// One row of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsLink {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Hash")]
    pub hash: String,
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Type")]
    pub data_type: DataType,
}

/// Listing for a single argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LsObject {
    #[serde(rename = "Argument")]
    pub argument: String,
    #[serde(rename = "Links")]
    pub links: Vec<LsLink>,
}

impl LsObject {
    /// True when the object is a lone row named after the argument
    ///  itself, i.e. a file. A directory whose only child happens to
    ///  share the argument's name reads the same way.
    pub fn is_single_entry(&self) -> bool {
        matches!(self.links.as_slice(), [link] if link.name == self.argument)
    }
}

/// Listings for every argument, in argument order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LsOutput {
    #[serde(rename = "Objects")]
    pub objects: Vec<LsObject>,
}
