use cid::Cid;
use multihash::Multihash;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Multicodec code for DAG-CBOR blocks
pub const LD_DAG_CBOR_CODEC: u64 = 0x71;
/// Multicodec code for raw blocks
pub const LD_RAW_CODEC: u64 = 0x55;
/// Multihash code for SHA2-256
pub const SHA2_256_CODE: u64 = 0x12;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("failed to encode block: {0}")]
    Encode(String),
    #[error("failed to decode block: {0}")]
    Decode(String),
    #[error("multihash error: {0}")]
    Multihash(#[from] multihash::Error),
}

/// A serialization format blocks can be written in.
pub trait Codec {
    /// The multicodec code recorded in CIDs for this format
    const CODE: u64;

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError>;
    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DagCborCodec;

impl Codec for DagCborCodec {
    const CODE: u64 = LD_DAG_CBOR_CODEC;

    fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
        serde_ipld_dagcbor::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
        serde_ipld_dagcbor::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}

/// Types that live in the store as a single block of codec `C`.
///  Implementors just opt in, the encoding comes from the codec.
pub trait BlockEncoded<C: Codec>: Serialize + DeserializeOwned {
    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        C::encode(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, CodecError> {
        C::decode(bytes)
    }

    /// Content address this value would be stored under
    fn cid(&self) -> Result<Cid, CodecError> {
        cid_for(C::CODE, &self.encode()?)
    }
}

/// Compute the CIDv1 (sha2-256) for an already encoded block
pub fn cid_for(codec: u64, bytes: &[u8]) -> Result<Cid, CodecError> {
    let digest = Sha256::digest(bytes);
    let hash = Multihash::<64>::wrap(SHA2_256_CODE, &digest)?;
    Ok(Cid::new_v1(codec, hash))
}
