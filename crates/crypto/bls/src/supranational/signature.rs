use blst::min_pk::Signature as BlstSignature;
use ssz_types::FixedVector;

use crate::{
    constants::DST,
    errors::BLSError,
    pubkey::PubKey,
    signature::BLSSignature,
    supranational::errors::BlstError,
    traits::{SupranationalVerifiable, Verifiable},
};

impl From<BlstSignature> for BLSSignature {
    fn from(value: BlstSignature) -> Self {
        BLSSignature {
            inner: FixedVector::from(value.to_bytes().to_vec()),
        }
    }
}

impl BLSSignature {
    pub fn to_blst_signature(&self) -> Result<BlstSignature, BLSError> {
        BlstSignature::from_bytes(self.to_bytes()).map_err(|err| BLSError::BlstError(err.into()))
    }
}

impl Verifiable for BLSSignature {
    type Error = BLSError;

    fn verify(&self, pubkey: &PubKey, message: &[u8]) -> Result<bool, BLSError> {
        let signature = self.to_blst_signature()?;
        let public_key = pubkey.to_blst_pubkey()?;

        match BlstError::check(signature.verify(true, message, DST, &[], &public_key, false)) {
            Ok(()) => Ok(true),
            Err(BlstError::VerificationFailed) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

impl SupranationalVerifiable for BLSSignature {}
