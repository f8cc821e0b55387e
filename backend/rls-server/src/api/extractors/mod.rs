pub mod access;
pub mod bearer_token;
pub mod identity;
