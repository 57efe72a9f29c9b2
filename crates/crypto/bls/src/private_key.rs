use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{constants::PRIVATE_KEY_BYTES_LEN, errors::BLSError};

/// A BLS12-381 secret scalar in big-endian form. The bytes are wiped when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    inner: [u8; PRIVATE_KEY_BYTES_LEN],
}

impl PrivateKey {
    /// Wraps raw bytes without checking that they are a valid scalar. Backends perform
    /// that check when the key is first used.
    pub fn from_raw(inner: [u8; PRIVATE_KEY_BYTES_LEN]) -> Self {
        Self { inner }
    }

    pub fn to_bytes(&self) -> &[u8; PRIVATE_KEY_BYTES_LEN] {
        &self.inner
    }

    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, BLSError> {
        let inner: [u8; PRIVATE_KEY_BYTES_LEN] =
            bytes
                .try_into()
                .map_err(|_| BLSError::InvalidByteLength {
                    expected: PRIVATE_KEY_BYTES_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self { inner })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
