/**
 * Content addressing and block encoding.
 *  CIDs, the DAG-CBOR codec and the `BlockEncoded`
 *  trait everything stored in the DAG implements.
 */
pub mod linked_data;
/**
 * Listing directory-like entries: the listing
 *  builder and the text table renderer.
 */
pub mod ls;
/**
 * Where blocks come from, and how paths are
 *  walked to the nodes they name.
 */
pub mod store;
/**
 * Fixture builder for writing small DAGs into a store.
 */
pub mod testkit;
/**
 * Filesystem interpretation of DAG nodes:
 *  files, directories and the sizes we report for them.
 */
pub mod unixfs;

pub mod prelude {
    pub use crate::linked_data::{BlockEncoded, Cid, CodecError};
    pub use crate::ls::{render, LsError, LsLink, LsObject, LsOutput, Lister};
    pub use crate::store::{BlockStore, FsStore, MemoryStore, ResolveError, Resolver, StoreError};
    pub use crate::unixfs::{DataType, Entry, EntryError, Node, NodeLink};
}
