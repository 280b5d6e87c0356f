mod identity_factory;
mod static_token_verifier;
mod token_info_verifier;

pub use identity_factory::IdentityVerifierFactory;
pub use static_token_verifier::StaticTokenVerifier;
pub use token_info_verifier::{TokenInfo, TokenInfoVerifier};
