pub mod bls_to_execution_change;
pub mod constants;
pub mod fork;
pub mod misc;
pub mod withdrawal_credentials;
