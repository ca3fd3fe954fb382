//! Payment and stake credentials

use crate::error::AddressError;
use crate::hash::{Hash, KeyHash, ScriptHash};

/// Length of a credential hash in the binary address format
pub const CREDENTIAL_HASH_LEN: usize = 28;

/// A payment or stake credential: the 28-byte hash of either a verification
/// key or a script.
///
/// Which of the two it is comes from a header bit in the enclosing address;
/// the credential itself is just the hash, never re-classified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Credential {
    /// Hash of a verification key
    KeyHash(KeyHash),

    /// Hash of a script
    ScriptHash(ScriptHash),
}

impl Credential {
    /// Read a credential at `offset`, with the key/script discriminant
    /// supplied by the caller from the address header
    pub fn read(data: &[u8], offset: usize, script: bool) -> Result<Self, AddressError> {
        let end = offset.checked_add(CREDENTIAL_HASH_LEN);
        match end.and_then(|end| data.get(offset..end)) {
            Some(bytes) => {
                let mut hash = [0u8; CREDENTIAL_HASH_LEN];
                hash.copy_from_slice(bytes);
                Ok(match script {
                    true => Self::ScriptHash(hash.into()),
                    false => Self::KeyHash(hash.into()),
                })
            }
            None => Err(AddressError::InsufficientCredentialBytes {
                offset,
                available: data.len().saturating_sub(offset),
            }),
        }
    }

    /// Append the raw 28-byte hash
    pub fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.hash().as_ref());
    }

    /// The underlying hash, whichever kind it is
    pub fn hash(&self) -> &Hash<CREDENTIAL_HASH_LEN> {
        match self {
            Self::KeyHash(hash) | Self::ScriptHash(hash) => hash,
        }
    }

    /// True for script credentials (drives the relevant header bit)
    pub fn is_script(&self) -> bool {
        matches!(self, Self::ScriptHash(_))
    }
}
