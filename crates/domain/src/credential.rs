use std::collections::HashMap;
use std::fmt;

/// Key under which the host stores the API key in its credential map.
pub const CREDENTIAL_KEY: &str = "actionbook_api_key";

/// An opaque API key owned by the host runtime.
///
/// `Debug` is redacted so the key never ends up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// `None` for blank keys: a blank key means "no credential".
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_owned();
        (!key.is_empty()).then_some(Self(key))
    }

    /// Pull the API key out of a host credential map.
    pub fn from_map(credentials: &HashMap<String, String>) -> Option<Self> {
        credentials.get(CREDENTIAL_KEY).cloned().and_then(Self::new)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
