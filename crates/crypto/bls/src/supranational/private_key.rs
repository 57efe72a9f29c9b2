use blst::min_pk::SecretKey as BlstSecretKey;

use crate::{
    constants::DST,
    errors::BLSError,
    private_key::PrivateKey,
    pubkey::PubKey,
    signature::BLSSignature,
    traits::{Signable, SupranationalSignable},
};

impl From<&BlstSecretKey> for PrivateKey {
    fn from(value: &BlstSecretKey) -> Self {
        PrivateKey::from_raw(value.to_bytes())
    }
}

impl PrivateKey {
    /// Parses the scalar, rejecting zero and values not below the curve order.
    pub fn to_blst_secret_key(&self) -> Result<BlstSecretKey, BLSError> {
        BlstSecretKey::from_bytes(self.to_bytes()).map_err(|err| BLSError::BlstError(err.into()))
    }
}

impl Signable for PrivateKey {
    type Error = BLSError;

    fn sign(&self, message: &[u8]) -> Result<BLSSignature, BLSError> {
        let secret_key = self.to_blst_secret_key()?;
        Ok(secret_key.sign(message, DST, &[]).into())
    }

    fn public_key(&self) -> Result<PubKey, BLSError> {
        Ok(self.to_blst_secret_key()?.sk_to_pk().into())
    }
}

impl SupranationalSignable for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Verifiable;

    #[test]
    fn test_sign_then_verify() {
        let private_key = PrivateKey::from_raw([0x11; 32]);
        let public_key = private_key.public_key().unwrap();
        let signature = private_key.sign(b"credential change").unwrap();

        assert!(signature.verify(&public_key, b"credential change").unwrap());
        assert!(!signature.verify(&public_key, b"something else").unwrap());
    }

    #[test]
    fn test_out_of_range_scalar_is_rejected() {
        let private_key = PrivateKey::from_raw([0xff; 32]);
        assert!(matches!(
            private_key.public_key(),
            Err(BLSError::BlstError(_))
        ));
    }
}
