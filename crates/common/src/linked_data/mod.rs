//! Content addressing for blocks in the store.
//!
//! Every block is addressed by a CIDv1 over the SHA2-256 of its encoded
//!  bytes. Structured blocks (DAG nodes) are DAG-CBOR encoded.

mod codec;

pub use cid::Cid;
pub use codec::{
    cid_for, BlockEncoded, Codec, CodecError, DagCborCodec, LD_DAG_CBOR_CODEC, LD_RAW_CODEC,
    SHA2_256_CODE,
};
