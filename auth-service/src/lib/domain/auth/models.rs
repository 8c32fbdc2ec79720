/// Identity extracted from an accepted access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedSubject {
    /// Account email carried in the token
    pub subject: String,
    /// Raw token, passed through for later revocation
    pub token: String,
}
