pub mod derivation;
pub mod errors;
pub mod private_key;
pub mod pubkey;
pub mod signature;
