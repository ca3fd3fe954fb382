//! Cardano address types and the binary (CIP-19) address codec

use crate::credential::{Credential, CREDENTIAL_HASH_LEN};
use crate::error::AddressError;
use crate::pointer::Pointer;
use anyhow::{anyhow, Result};

/// Network identifier carried in the low nibble of the address header.
///
/// The binary codec accepts any 4-bit value; whether a given id is allowed
/// is a caller policy (the text layer enforces agreement with the bech32
/// prefix, see [`Address::from_string`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NetworkId(u8);

impl NetworkId {
    /// Mainnet network id
    pub const MAINNET: NetworkId = NetworkId(1);

    /// The usual testnet network id
    pub const TESTNET: NetworkId = NetworkId(0);

    /// Construct from a raw id, masked to 4 bits
    pub fn new(id: u8) -> Self {
        NetworkId(id & 0x0f)
    }

    /// Raw 4-bit value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// True for the mainnet id
    pub fn is_mainnet(&self) -> bool {
        self.0 == 1
    }
}

impl Default for NetworkId {
    fn default() -> Self {
        Self::MAINNET
    }
}

/// A Byron-era address, carried as an uninterpreted payload
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ByronAddress {
    /// Raw bytes, including the leading 0b1000 header
    pub payload: Vec<u8>,
}

/// A Cardano address.
///
/// One variant per wire shape. The header byte's top nibble selects the
/// variant (and the key/script kind of each credential); the bottom nibble
/// carries the network id for every shape except Byron.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Address {
    /// Payment credential plus a stake credential (types 0-3)
    Base {
        network: NetworkId,
        payment: Credential,
        stake: Credential,
    },

    /// Payment credential only (types 6-7)
    Enterprise {
        network: NetworkId,
        payment: Credential,
    },

    /// Payment credential plus a delegation pointer (types 4-5)
    Pointer {
        network: NetworkId,
        payment: Credential,
        pointer: Pointer,
    },

    /// A reward (stake) account (types 14-15)
    Reward {
        network: NetworkId,
        credential: Credential,
    },

    /// Legacy Byron address (type 8), passed through untouched
    Byron(ByronAddress),
}

impl Address {
    /// Decode from the binary form.
    ///
    /// Trailing bytes beyond a variant's fixed layout are tolerated here;
    /// callers that require exact-length input check the length themselves.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AddressError> {
        let header = *data.first().ok_or(AddressError::EmptyInput)?;
        let address_type = header >> 4;
        let network = NetworkId::new(header & 0x0f);

        match address_type {
            // Base: header bit 4 = payment is a script, bit 5 = stake is a script
            0b0000..=0b0011 => {
                let payment = Credential::read(data, 1, header & 0x10 != 0)?;
                let stake = Credential::read(data, 1 + CREDENTIAL_HASH_LEN, header & 0x20 != 0)?;
                Ok(Self::Base {
                    network,
                    payment,
                    stake,
                })
            }

            0b0100 | 0b0101 => {
                let payment = Credential::read(data, 1, header & 0x10 != 0)?;
                let (pointer, _consumed) = Pointer::read(data, 1 + CREDENTIAL_HASH_LEN)?;
                Ok(Self::Pointer {
                    network,
                    payment,
                    pointer,
                })
            }

            0b0110 | 0b0111 => {
                let payment = Credential::read(data, 1, header & 0x10 != 0)?;
                Ok(Self::Enterprise { network, payment })
            }

            // Byron addresses encode their own internal structure - kept opaque
            0b1000 => Ok(Self::Byron(ByronAddress {
                payload: data.to_vec(),
            })),

            0b1110 | 0b1111 => {
                let credential = Credential::read(data, 1, header & 0x10 != 0)?;
                Ok(Self::Reward {
                    network,
                    credential,
                })
            }

            _ => Err(AddressError::UnknownAddressType { address_type }),
        }
    }

    /// Encode to the binary form, the exact mirror of [`Self::from_bytes`]
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Base {
                network,
                payment,
                stake,
            } => {
                let header = ((stake.is_script() as u8) << 5)
                    | ((payment.is_script() as u8) << 4)
                    | network.value();
                let mut data = Vec::with_capacity(1 + 2 * CREDENTIAL_HASH_LEN);
                data.push(header);
                payment.write(&mut data);
                stake.write(&mut data);
                data
            }

            Self::Pointer {
                network,
                payment,
                pointer,
            } => {
                let header =
                    0b0100_0000 | ((payment.is_script() as u8) << 4) | network.value();
                let mut data = vec![header];
                payment.write(&mut data);
                pointer.write(&mut data);
                data
            }

            Self::Enterprise { network, payment } => {
                let header =
                    0b0110_0000 | ((payment.is_script() as u8) << 4) | network.value();
                let mut data = vec![header];
                payment.write(&mut data);
                data
            }

            Self::Reward {
                network,
                credential,
            } => {
                let header =
                    0b1110_0000 | ((credential.is_script() as u8) << 4) | network.value();
                let mut data = vec![header];
                credential.write(&mut data);
                data
            }

            Self::Byron(byron) => byron.payload.clone(),
        }
    }

    /// Network id, if the variant carries one (Byron does not)
    pub fn network(&self) -> Option<NetworkId> {
        match self {
            Self::Base { network, .. }
            | Self::Enterprise { network, .. }
            | Self::Pointer { network, .. }
            | Self::Reward { network, .. } => Some(*network),
            Self::Byron(_) => None,
        }
    }

    /// Payment credential (the sole credential for reward accounts)
    pub fn payment_credential(&self) -> Option<&Credential> {
        match self {
            Self::Base { payment, .. }
            | Self::Enterprise { payment, .. }
            | Self::Pointer { payment, .. } => Some(payment),
            Self::Reward { credential, .. } => Some(credential),
            Self::Byron(_) => None,
        }
    }

    /// Get the delegation pointer if there is one
    pub fn pointer(&self) -> Option<Pointer> {
        match self {
            Self::Pointer { pointer, .. } => Some(*pointer),
            _ => None,
        }
    }

    /// Bech32 human-readable prefix for this address on its network
    fn hrp(&self) -> Result<bech32::Hrp> {
        let mainnet = self.network().is_some_and(|n| n.is_mainnet());
        let hrp = match self {
            Self::Byron(_) => return Err(anyhow!("Byron addresses use base58, not bech32")),
            Self::Reward { .. } => {
                if mainnet {
                    "stake"
                } else {
                    "stake_test"
                }
            }
            _ => {
                if mainnet {
                    "addr"
                } else {
                    "addr_test"
                }
            }
        };
        Ok(bech32::Hrp::parse(hrp)?)
    }

    /// Read from standard string form ("addr1...", "stake1...", or base58
    /// for Byron).
    ///
    /// Unlike the binary codec, this layer does enforce network policy:
    /// the header's network id must agree with the prefix ("addr"/"stake"
    /// for mainnet, the "_test" forms for everything else), and the prefix
    /// family must agree with the decoded shape.
    pub fn from_string(text: &str) -> Result<Self> {
        if text.starts_with("addr1")
            || text.starts_with("addr_test1")
            || text.starts_with("stake1")
            || text.starts_with("stake_test1")
        {
            let (hrp, data) = bech32::decode(text)?;
            let address = Self::from_bytes(&data)?;

            let network = address
                .network()
                .ok_or_else(|| anyhow!("Byron payload under prefix {}", hrp.as_str()))?;
            if network.is_mainnet() == hrp.as_str().contains("test") {
                return Err(AddressError::InvalidNetworkId {
                    network: network.value(),
                }
                .into());
            }

            let stake_prefix = hrp.as_str().starts_with("stake");
            if stake_prefix != matches!(address, Self::Reward { .. }) {
                return Err(anyhow!(
                    "prefix {} does not match the address type",
                    hrp.as_str()
                ));
            }

            Ok(address)
        } else {
            let payload = bs58::decode(text).into_vec()?;
            Ok(Self::Byron(ByronAddress { payload }))
        }
    }

    /// Convert to standard string form
    pub fn to_string(&self) -> Result<String> {
        match self {
            Self::Byron(byron) => Ok(bs58::encode(&byron.payload).into_string()),
            _ => Ok(bech32::encode::<bech32::Bech32>(
                self.hrp()?,
                &self.to_bytes(),
            )?),
        }
    }
}

// The CBOR layer treats an address as an opaque byte string
impl<C> minicbor::Encode<C> for Address {
    fn encode<W: minicbor::encode::Write>(
        &self,
        e: &mut minicbor::Encoder<W>,
        _ctx: &mut C,
    ) -> Result<(), minicbor::encode::Error<W::Error>> {
        e.bytes(&self.to_bytes())?;
        Ok(())
    }
}

impl<'b, C> minicbor::Decode<'b, C> for Address {
    fn decode(
        d: &mut minicbor::Decoder<'b>,
        _ctx: &mut C,
    ) -> Result<Self, minicbor::decode::Error> {
        let bytes = d.bytes()?;
        Self::from_bytes(bytes)
            .map_err(|e| minicbor::decode::Error::message(format!("invalid address: {e}")))
    }
}
