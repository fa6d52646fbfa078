//! E-mail Relay Gateway
//!
//! Binds the platform relay client to the domain's [`EmailRelay`] port.

use platform::mail::{RelayClient, RelayError, TemplateParams};

use crate::application::config::SignupConfig;
use crate::domain::gateway::EmailRelay;

impl EmailRelay for RelayClient {
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), RelayError> {
        RelayClient::send(self, service_id, template_id, params).await
    }
}

/// Build the relay client described by `config`
///
/// Missing credentials are not an error here: the client is still built and
/// every send fails until they are provided.
pub fn relay_client(config: &SignupConfig) -> Result<RelayClient, RelayError> {
    if !config.relay.is_complete() {
        tracing::warn!("E-mail relay credentials are incomplete; submissions will fail");
    }
    RelayClient::new(
        config.relay_endpoint.clone(),
        config.relay.public_key.clone(),
        config.relay_timeout,
    )
}
