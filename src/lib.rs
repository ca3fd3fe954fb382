// Cardano address binary codec - main library exports

pub mod address;
pub mod credential;
pub mod error;
pub mod hash;
pub mod pointer;
pub mod varint;

// Flattened re-exports
pub use self::address::{Address, ByronAddress, NetworkId};
pub use self::credential::{Credential, CREDENTIAL_HASH_LEN};
pub use self::error::AddressError;
pub use self::hash::{Hash, KeyHash, ScriptHash};
pub use self::pointer::Pointer;
pub use self::varint::{VarIntDecoder, VarIntEncoder};
