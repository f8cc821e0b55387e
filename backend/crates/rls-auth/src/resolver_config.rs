/// Default authorization scheme token (compared case-insensitively)
pub const DEFAULT_SCHEME: &str = "bearer";
/// Default query parameter names, checked in order
pub const DEFAULT_QUERY_PARAMS: [&str; 2] = ["access_token", "token"];
/// Default sub-protocol key, matched as `access_token=<credential>`
pub const DEFAULT_PROTOCOL_PREFIX: &str = "access_token";

/// Where the resolver looks for a credential.
///
/// Built once at startup from configuration and handed to
/// [`crate::TokenResolver::new`].
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Accepted authorization scheme
    pub scheme: String,
    /// Query parameter names, first match wins
    pub query_params: Vec<String>,
    /// Key of the sub-protocol entry carrying the credential
    pub protocol_prefix: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            query_params: DEFAULT_QUERY_PARAMS.iter().map(|s| s.to_string()).collect(),
            protocol_prefix: DEFAULT_PROTOCOL_PREFIX.to_string(),
        }
    }
}
