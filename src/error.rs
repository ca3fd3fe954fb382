//! Error types for the binary address codec

use thiserror::Error;

/// Errors raised while decoding the binary address format.
///
/// Decoding either yields a complete [`Address`](crate::Address) or the first
/// error hit; a partial value is never returned, and nothing is retried or
/// recovered mid-decode. Offsets refer to the input buffer handed to the
/// outermost decode call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, Error)]
pub enum AddressError {
    /// Zero-length input buffer
    #[error("empty address data")]
    EmptyInput,

    /// Header type nibble matches no known address shape
    #[error("unknown address type {address_type:#06b}")]
    UnknownAddressType { address_type: u8 },

    /// Fewer than 28 bytes remain where a credential hash is expected
    #[error("credential at offset {offset} needs 28 bytes, {available} available")]
    InsufficientCredentialBytes { offset: usize, available: usize },

    /// A variable-length integer's continuation chain ran off the buffer
    #[error("variable-length integer starting at offset {offset} ran out of data")]
    TruncatedVarInt { offset: usize },

    /// A variable-length integer carries payload bits beyond what u64 can hold
    #[error("variable-length integer starting at offset {offset} overflows u64")]
    VarIntOverflow { offset: usize },

    /// Network id disagrees with what the caller expects for this address
    #[error("network id {network} does not match the address prefix")]
    InvalidNetworkId { network: u8 },
}

impl AddressError {
    /// Rebase recorded varint offsets onto the full input buffer
    pub(crate) fn offset_by(self, base: usize) -> Self {
        match self {
            Self::TruncatedVarInt { offset } => Self::TruncatedVarInt { offset: base + offset },
            Self::VarIntOverflow { offset } => Self::VarIntOverflow { offset: base + offset },
            other => other,
        }
    }
}
