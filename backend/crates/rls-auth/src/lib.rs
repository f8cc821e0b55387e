pub mod access_projection;
pub mod claim_decoder;
pub mod error;
pub mod identity_context;
pub mod resolver_config;
pub mod token_encoder;
pub mod token_resolver;

pub use access_projection::AccessProjection;
pub use claim_decoder::ClaimDecoder;
pub use error::{AuthError, Result};
pub use identity_context::{Audience, IdentityContext, Plan};
pub use resolver_config::{
    DEFAULT_PROTOCOL_PREFIX, DEFAULT_QUERY_PARAMS, DEFAULT_SCHEME, ResolverConfig,
};
pub use token_encoder::encode_unsigned;
pub use token_resolver::{CredentialSource, TokenResolver};

#[cfg(test)]
mod tests;
