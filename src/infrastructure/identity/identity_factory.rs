use std::sync::Arc;

use crate::application::ports::{IdentityError, IdentityVerifier};
use crate::presentation::config::{IdentityProviderSetting, IdentitySettings};

use super::static_token_verifier::StaticTokenVerifier;
use super::token_info_verifier::TokenInfoVerifier;

pub struct IdentityVerifierFactory;

impl IdentityVerifierFactory {
    pub fn create(settings: &IdentitySettings) -> Result<Arc<dyn IdentityVerifier>, IdentityError> {
        match settings.provider {
            IdentityProviderSetting::TokenInfo => {
                tracing::info!(endpoint = %settings.token_info_url, "Using token-info identity verifier");
                Ok(Arc::new(TokenInfoVerifier::new(
                    &settings.token_info_url,
                    settings.audience.clone(),
                )?))
            }
            IdentityProviderSetting::Static => {
                tracing::warn!(
                    tokens = settings.static_tokens.len(),
                    "Using static token table for identity"
                );
                Ok(Arc::new(StaticTokenVerifier::new(
                    settings.static_tokens.clone(),
                )))
            }
        }
    }
}
