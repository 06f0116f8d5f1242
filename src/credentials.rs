use serde::{Deserialize, Serialize};

use crate::error::MonitorError;
use crate::traits::CredentialProvider;
use crate::MonitorResult;

#[derive(Serialize, Deserialize, Clone)]
/// Credentials for the client.
pub struct Credentials {
    /// The bearer access token.
    pub access_token: String,
}

impl Credentials {
    /// Creates a new `Credentials` struct.
    pub fn new(access_token: &str) -> Credentials {
        Credentials {
            access_token: access_token.to_string(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[async_trait::async_trait]
impl CredentialProvider for Credentials {
    async fn access_token(&self) -> MonitorResult<String> {
        if self.access_token.is_empty() {
            return Err(MonitorError::MissingCredentials);
        }
        Ok(self.access_token.clone())
    }
}
