use blst::BLST_ERROR;
use thiserror::Error;

/// Wrapper for the errors returned by the blst library
#[derive(Error, Debug, PartialEq)]
pub enum BlstError {
    #[error("bad encoding")]
    BadEncoding,
    #[error("point is not on curve")]
    PointNotOnCurve,
    #[error("point is not in the correct group")]
    PointNotInGroup,
    #[error("aggregate type mismatch")]
    AggrTypeMismatch,
    #[error("verification failed")]
    VerificationFailed,
    #[error("public key is infinity")]
    PublicKeyIsInfinity,
    #[error("scalar is out of range")]
    BadScalar,
    #[error("unexpected status: {0:?}")]
    Unknown(BLST_ERROR),
}

impl BlstError {
    /// Turns a blst status code into a `Result`, treating `BLST_SUCCESS` as `Ok`.
    pub fn check(status: BLST_ERROR) -> Result<(), BlstError> {
        match status {
            BLST_ERROR::BLST_SUCCESS => Ok(()),
            error => Err(error.into()),
        }
    }
}

impl From<BLST_ERROR> for BlstError {
    fn from(error: BLST_ERROR) -> Self {
        match error {
            BLST_ERROR::BLST_BAD_ENCODING => BlstError::BadEncoding,
            BLST_ERROR::BLST_POINT_NOT_ON_CURVE => BlstError::PointNotOnCurve,
            BLST_ERROR::BLST_POINT_NOT_IN_GROUP => BlstError::PointNotInGroup,
            BLST_ERROR::BLST_AGGR_TYPE_MISMATCH => BlstError::AggrTypeMismatch,
            BLST_ERROR::BLST_VERIFY_FAIL => BlstError::VerificationFailed,
            BLST_ERROR::BLST_PK_IS_INFINITY => BlstError::PublicKeyIsInfinity,
            BLST_ERROR::BLST_BAD_SCALAR => BlstError::BadScalar,
            // Callers should go through `check`; a success code here has no error meaning.
            other => BlstError::Unknown(other),
        }
    }
}
