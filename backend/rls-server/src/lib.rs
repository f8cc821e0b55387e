pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod ws;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::{access::Access, bearer_token::BearerToken, identity::Identity},
    session::{SessionResponse, session},
    token::{TokenResponse, token},
    whoami::{WhoAmIResponse, whoami},
};
pub use app_state::AppState;
pub use routes::build_router;
pub use ws::ConnectedMessage;
