use std::collections::HashMap;

use casebrief::application::ports::{IdentityError, IdentityVerifier};
use casebrief::infrastructure::identity::{
    IdentityVerifierFactory, StaticTokenVerifier, TokenInfo, TokenInfoVerifier,
};
use casebrief::presentation::config::{IdentityProviderSetting, IdentitySettings};

#[tokio::test]
async fn given_known_token_when_verifying_statically_then_user_is_resolved() {
    let verifier = StaticTokenVerifier::new([("token-a", "alice")]);

    let user = verifier.verify("token-a").await.expect("known token");

    assert_eq!(user.as_str(), "alice");
}

#[tokio::test]
async fn given_unknown_token_when_verifying_statically_then_token_is_rejected() {
    let verifier = StaticTokenVerifier::new([("token-a", "alice")]);

    let result = verifier.verify("token-b").await;

    assert!(matches!(result, Err(IdentityError::InvalidToken)));
}

#[test]
fn given_expected_audience_when_token_matches_then_check_passes() {
    let verifier = TokenInfoVerifier::new(
        "https://oauth2.example.com/tokeninfo",
        Some("casebrief".to_string()),
    )
    .expect("client");

    let info = TokenInfo {
        sub: "user-1".to_string(),
        aud: Some("casebrief".to_string()),
    };

    assert!(verifier.check_audience(&info).is_ok());
}

#[test]
fn given_expected_audience_when_token_targets_other_audience_then_check_fails() {
    let verifier = TokenInfoVerifier::new(
        "https://oauth2.example.com/tokeninfo",
        Some("casebrief".to_string()),
    )
    .expect("client");

    let info = TokenInfo {
        sub: "user-1".to_string(),
        aud: Some("someone-else".to_string()),
    };

    assert!(matches!(
        verifier.check_audience(&info),
        Err(IdentityError::InvalidToken)
    ));
}

#[tokio::test]
async fn given_static_settings_when_creating_verifier_then_table_is_used() {
    let settings = IdentitySettings {
        provider: IdentityProviderSetting::Static,
        token_info_url: String::new(),
        audience: None,
        static_tokens: HashMap::from([("dev-token".to_string(), "dev-user".to_string())]),
    };

    let verifier = IdentityVerifierFactory::create(&settings).expect("verifier");

    let user = verifier.verify("dev-token").await.expect("known token");
    assert_eq!(user.as_str(), "dev-user");
}
