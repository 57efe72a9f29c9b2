/// How many account indices to try when a named validator's key is not at the account
/// matching its validator index.
pub const DEFAULT_MAX_ACCOUNT_DISTANCE: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub max_account_distance: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_account_distance: DEFAULT_MAX_ACCOUNT_DISTANCE,
        }
    }
}
