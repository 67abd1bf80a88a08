use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Kind of a user-facing event raised by the identity system.
///
/// The set is closed. Names are SCREAMING_SNAKE_CASE both on the wire and in
/// configuration; parsing accepts any ASCII case.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EventType {
    Login,
    LoginError,
    Register,
    RegisterError,
    Logout,
    LogoutError,
    CodeToToken,
    CodeToTokenError,
    ClientLogin,
    ClientLoginError,
    RefreshToken,
    RefreshTokenError,
    ValidateAccessToken,
    ValidateAccessTokenError,
    IntrospectToken,
    IntrospectTokenError,
    FederatedIdentityLink,
    FederatedIdentityLinkError,
    RemoveFederatedIdentity,
    RemoveFederatedIdentityError,
    UpdateEmail,
    UpdateEmailError,
    UpdateProfile,
    UpdateProfileError,
    UpdatePassword,
    UpdatePasswordError,
    UpdateTotp,
    UpdateTotpError,
    VerifyEmail,
    VerifyEmailError,
    RemoveTotp,
    RemoveTotpError,
    GrantConsent,
    GrantConsentError,
    UpdateConsent,
    UpdateConsentError,
    RevokeGrant,
    RevokeGrantError,
    SendVerifyEmail,
    SendVerifyEmailError,
    SendResetPassword,
    SendResetPasswordError,
    SendIdentityProviderLink,
    SendIdentityProviderLinkError,
    ResetPassword,
    ResetPasswordError,
    IdentityProviderLogin,
    IdentityProviderLoginError,
    IdentityProviderFirstLogin,
    IdentityProviderFirstLoginError,
    Impersonate,
    ImpersonateError,
    CustomRequiredAction,
    CustomRequiredActionError,
    ExecuteActions,
    ExecuteActionsError,
}

impl EventType {
    /// Canonical upper-case name, as used in routing metadata.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Whether this type records a failed attempt.
    pub fn is_error(self) -> bool {
        self.name().ends_with("_ERROR")
    }

    /// Parse a configured name. Surrounding whitespace is ignored.
    pub fn parse(name: &str) -> Option<Self> {
        Self::from_str(name.trim()).ok()
    }
}
