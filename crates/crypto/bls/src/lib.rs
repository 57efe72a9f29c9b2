//! BLS12-381 primitives used by the consensus layer: public keys, signatures and
//! private keys, with the signing backend selected at compile time.
//!
//! Only the "supranational" backend (supranational/blst) is wired in. It provides signing,
//! verification and EIP-2333 key derivation.

pub mod constants;
pub mod errors;
pub mod private_key;
pub mod pubkey;
pub mod signature;
pub mod traits;

pub use private_key::PrivateKey;
pub use pubkey::PubKey;
pub use signature::BLSSignature;

#[cfg(feature = "supranational")]
pub mod supranational;
