use std::fmt;

use serde::{Deserialize, Serialize};

use crate::linked_data::{BlockEncoded, CodecError, DagCborCodec};

/**
 * Entries
 * =======
 * An entry is the filesystem reading of a node's payload.
 *  The node itself only knows about bytes and named links,
 *  the entry tells us whether those links make up a file
 *  (ordered chunks) or a directory (named children), along
 *  with the size bookkeeping we need to report a file's
 *  logical length without walking its chunks.
 */

/// Kind of filesystem object a node represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Raw,
    Directory,
    File,
    Metadata,
    Symlink,
}

impl DataType {
    /// Canonical name, as shown in listings
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Raw => "Raw",
            DataType::Directory => "Directory",
            DataType::File => "File",
            DataType::Metadata => "Metadata",
            DataType::Symlink => "Symlink",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("malformed entry: {0}")]
    Malformed(#[from] CodecError),
    #[error("file size overflows u64")]
    SizeOverflow,
}

/// Decoded payload of a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(rename = "Type")]
    data_type: DataType,
    // Total logical length. Only meaningful for files, and may be
    //  left out when the blocksizes already describe the file
    #[serde(rename = "Filesize", default, skip_serializing_if = "Option::is_none")]
    filesize: Option<u64>,
    // Logical length of each chunk, in link order
    #[serde(rename = "Blocksizes", default, skip_serializing_if = "Vec::is_empty")]
    blocksizes: Vec<u64>,
}

impl BlockEncoded<DagCborCodec> for Entry {}

impl Entry {
    pub fn new(data_type: DataType) -> Self {
        Self {
            data_type,
            filesize: None,
            blocksizes: Vec::new(),
        }
    }

    /// A single-block file of the given length
    pub fn file(filesize: u64) -> Self {
        Self {
            data_type: DataType::File,
            filesize: Some(filesize),
            blocksizes: Vec::new(),
        }
    }

    /// A file split over several chunks. The total is recorded
    ///  alongside the per-chunk sizes.
    pub fn chunked_file(blocksizes: Vec<u64>) -> Result<Self, EntryError> {
        let filesize = total(&blocksizes)?;
        Ok(Self {
            data_type: DataType::File,
            filesize: Some(filesize),
            blocksizes,
        })
    }

    pub fn directory() -> Self {
        Self::new(DataType::Directory)
    }

    pub fn symlink() -> Self {
        Self::new(DataType::Symlink)
    }

    pub fn raw(len: u64) -> Self {
        Self {
            data_type: DataType::Raw,
            filesize: Some(len),
            blocksizes: Vec::new(),
        }
    }

    /// Parse a node payload
    pub fn from_bytes(payload: &[u8]) -> Result<Self, EntryError> {
        Ok(<Self as BlockEncoded<DagCborCodec>>::decode(payload)?)
    }

    /// Serialize into a node payload
    pub fn to_bytes(&self) -> Result<Vec<u8>, EntryError> {
        Ok(<Self as BlockEncoded<DagCborCodec>>::encode(self)?)
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Logical content length. Falls back to the sum of the
    ///  chunk sizes when no explicit total was recorded.
    pub fn filesize(&self) -> Result<u64, EntryError> {
        match self.filesize {
            Some(filesize) => Ok(filesize),
            None => total(&self.blocksizes),
        }
    }
}

fn total(blocksizes: &[u64]) -> Result<u64, EntryError> {
    blocksizes
        .iter()
        .try_fold(0u64, |acc, size| acc.checked_add(*size))
        .ok_or(EntryError::SizeOverflow)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_entry_encode_decode() {
        let entry = Entry::chunked_file(vec![256, 256, 12]).unwrap();
        let bytes = entry.to_bytes().unwrap();
        let decoded = Entry::from_bytes(&bytes).unwrap();

        assert_eq!(entry, decoded);
        assert_eq!(decoded.data_type(), DataType::File);
        assert_eq!(decoded.filesize().unwrap(), 524);
    }

    #[test]
    fn test_filesize_falls_back_to_blocksizes() {
        let entry = Entry {
            data_type: DataType::File,
            filesize: None,
            blocksizes: vec![10, 20, 30],
        };
        assert_eq!(entry.filesize().unwrap(), 60);

        assert_eq!(Entry::directory().filesize().unwrap(), 0);
    }

    #[test]
    fn test_blocksizes_overflow() {
        let entry = Entry {
            data_type: DataType::File,
            filesize: None,
            blocksizes: vec![u64::MAX, 1],
        };
        let decoded = Entry::from_bytes(&entry.to_bytes().unwrap()).unwrap();
        assert!(matches!(decoded.filesize(), Err(EntryError::SizeOverflow)));

        assert!(matches!(
            Entry::chunked_file(vec![u64::MAX, 1]),
            Err(EntryError::SizeOverflow)
        ));
    }

    #[test]
    fn test_malformed_payload() {
        let result = Entry::from_bytes(b"definitely not cbor \xff");
        assert!(matches!(result, Err(EntryError::Malformed(_))));

        // valid cbor, wrong shape
        let bytes = serde_ipld_dagcbor::to_vec(&vec!["x", "y"]).unwrap();
        assert!(Entry::from_bytes(&bytes).is_err());
    }

    #[test]
    fn test_type_names() {
        assert_eq!(DataType::File.to_string(), "File");
        assert_eq!(DataType::Directory.to_string(), "Directory");
        assert_eq!(DataType::Symlink.to_string(), "Symlink");
        assert_eq!(
            serde_json::to_string(&DataType::Directory).unwrap(),
            r#""Directory""#
        );
    }
}
