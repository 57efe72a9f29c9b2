use crate::{errors::BLSError, BLSSignature, PubKey};

/// Trait for producing BLS signatures.
///
/// Implemented by secret keys. Messages are hashed to G2 with the proof-of-possession
/// domain separation tag, so a signature produced here verifies under [`Verifiable`].
pub trait Signable {
    type Error;

    /// Signs `message` (usually a 32-byte signing root).
    ///
    /// # Arguments
    /// * `message` - The bytes to sign
    ///
    /// # Returns
    /// * `Result<BLSSignature, Self::Error>` - The compressed signature, or an error if the secret
    ///   key is not a valid scalar
    fn sign(&self, message: &[u8]) -> Result<BLSSignature, Self::Error>;

    /// Returns the public key matching this secret key.
    fn public_key(&self) -> Result<PubKey, Self::Error>;
}

/// Marker trait for supranational/blst BLS signing implementation
pub trait SupranationalSignable: Signable<Error = BLSError> {}

/// Trait for verifying BLS signatures.
///
/// This trait provides functionality to verify individual BLS signatures against messages.
pub trait Verifiable {
    type Error;

    /// Verifies a BLS signature against a public key and message.
    ///
    /// # Arguments
    /// * `pubkey` - The public key to verify against
    /// * `message` - The message that was signed
    ///
    /// # Returns
    /// * `Result<bool, BLSError>` - Ok(true) if the signature is valid, Ok(false) if verification
    ///   fails, or Err if there are issues with signature or public key bytes
    fn verify(&self, pubkey: &PubKey, message: &[u8]) -> Result<bool, Self::Error>;
}

/// Marker trait for supranational/blst BLS signature verification implementation
pub trait SupranationalVerifiable: Verifiable<Error = BLSError> {}
