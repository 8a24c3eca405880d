//! UnixFS-style interpretation of DAG nodes
//!
//! - **[`Node`]**: one block, an opaque payload plus ordered [`NodeLink`]s
//! - **[`Entry`]**: the payload decoded as a filesystem object
//! - **[`DataType`]**: what kind of object an entry is
//!
//! ```text
//! Directory node --"docs"--> Directory node --"a.txt"--> File node
//!       |                                                   |
//!       +--"big.bin"--> File node (chunked)                 (single block)
//!                          |      |      |
//!                        chunk  chunk  chunk
//! ```
//!
//! A link's `size` is declared by the parent and counts encoded bytes of the
//!  whole sub-DAG. A file's logical length lives in its own entry.

mod entry;
mod node;

pub use entry::{DataType, Entry, EntryError};
pub use node::{Node, NodeLink};
