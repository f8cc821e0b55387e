use crate::{AuthError, ResolverConfig, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use log::{debug, warn};
use url::form_urlencoded;

/// Raw transport inputs that may carry a credential.
///
/// Adapters fill in whatever their transport offers; HTTP handlers usually
/// only set `authorization`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialSource<'a> {
    /// Value of the `Authorization` header
    pub authorization: Option<&'a str>,
    /// Raw (still percent-encoded) URI query string
    pub query: Option<&'a str>,
    /// Value of the sub-protocol negotiation header
    pub protocols: Option<&'a str>,
}

impl<'a> CredentialSource<'a> {
    pub fn from_authorization(authorization: Option<&'a str>) -> Self {
        Self {
            authorization,
            ..Self::default()
        }
    }
}

/// Extracts the raw credential from a request's transport channels.
///
/// Precedence: authorization header, then query parameter, then sub-protocol
/// entry. A header that is present but unusable is rejected outright and does
/// not fall through to the other channels.
#[derive(Debug, Clone)]
pub struct TokenResolver {
    config: ResolverConfig,
}

impl TokenResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    #[track_caller]
    pub fn resolve(&self, source: &CredentialSource<'_>) -> AuthErrorResult<String> {
        let caller = Location::caller();

        let token = match source.authorization.filter(|h| !h.is_empty()) {
            Some(header) => Some(self.from_header(header).map_err(|reason| {
                warn!("Rejected authorization header: {reason}");
                AuthError::CredentialMalformed {
                    reason,
                    location: ErrorLocation::from(caller),
                }
            })?),
            None => source
                .query
                .and_then(|q| self.from_query(q))
                .or_else(|| source.protocols.and_then(|p| self.from_protocols(p))),
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!("No credential found in header, query or sub-protocol");
            return Err(AuthError::CredentialMissing {
                location: ErrorLocation::from(caller),
            });
        };

        Ok(strip_bearer_prefix(&token).to_string())
    }

    fn from_header(&self, header: &str) -> Result<String, &'static str> {
        let (scheme, credential) = header.split_once(' ').unwrap_or((header, ""));

        if !scheme.eq_ignore_ascii_case(&self.config.scheme) {
            return Err("unsupported authorization scheme");
        }

        let credential = credential.trim();
        if credential.is_empty() {
            return Err("empty credential");
        }

        Ok(credential.to_string())
    }

    fn from_query(&self, query: &str) -> Option<String> {
        let pairs: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();

        self.config.query_params.iter().find_map(|name| {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    }

    fn from_protocols(&self, protocols: &str) -> Option<String> {
        protocols.split(',').map(str::trim).find_map(|candidate| {
            candidate
                .strip_prefix(self.config.protocol_prefix.as_str())
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| value.trim().to_string())
        })
    }
}

impl Default for TokenResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

/// Remove a redundant `Bearer ` prefix, whichever channel the value came from
fn strip_bearer_prefix(token: &str) -> &str {
    match token.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => token[7..].trim(),
        _ => token,
    }
}
