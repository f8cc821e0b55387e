//! WebSocket endpoint authenticated from header, query or sub-protocol.
//!
//! The upgrade is always accepted. Authentication failures close the socket
//! with code 1008 (policy violation) right after it opens.

use crate::AppState;

use rls_auth::{AccessProjection, AuthError, CredentialSource};

use std::panic::Location;

use axum::{
    extract::{
        RawQuery, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code},
    },
    http::HeaderMap,
    response::Response,
};
use error_location::ErrorLocation;
use http::header::{AUTHORIZATION, SEC_WEBSOCKET_PROTOCOL};
use log::{debug, error, info, warn};
use serde::Serialize;

/// First message sent on an authenticated socket
#[derive(Debug, Serialize)]
pub struct ConnectedMessage {
    pub tenant_id: String,
    pub user_id: String,
}

impl From<AccessProjection> for ConnectedMessage {
    fn from(projection: AccessProjection) -> Self {
        Self {
            tenant_id: projection.tenant.to_string(),
            user_id: projection.user.to_string(),
        }
    }
}

/// WebSocket upgrade handler
pub async fn handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    ws: WebSocketUpgrade,
) -> Response {
    let access = resolve_access(&state, &headers, query.as_deref());

    let offered = header_str(&headers, SEC_WEBSOCKET_PROTOCOL)
        .ok()
        .flatten()
        .map(|protocols| {
            negotiable_protocols(protocols, &state.resolver.config().protocol_prefix)
        })
        .unwrap_or_default();

    ws.protocols(offered)
        .on_upgrade(move |socket| handle_socket(socket, access))
}

/// Resolve and decode the upgrade request's credential
pub fn resolve_access(
    state: &AppState,
    headers: &HeaderMap,
    query: Option<&str>,
) -> Result<AccessProjection, AuthError> {
    let authorization = header_str(headers, AUTHORIZATION)?;
    // A usable header decides on its own; the protocol list is never consulted
    let protocols = match authorization {
        Some(header) if !header.is_empty() => None,
        _ => header_str(headers, SEC_WEBSOCKET_PROTOCOL)?,
    };

    let source = CredentialSource {
        authorization,
        query,
        protocols,
    };

    let token = state.resolver.resolve(&source)?;
    let identity = state.decoder.decode(&token)?;

    Ok(identity.project())
}

/// Sub-protocols the server may select from the client's offer.
///
/// Browsers fail the handshake unless one offered protocol is echoed back.
/// Credential entries (`<prefix>=...`) are only eligible when nothing else
/// was offered.
pub fn negotiable_protocols(protocols: &str, prefix: &str) -> Vec<String> {
    let (credentials, others): (Vec<&str>, Vec<&str>) = protocols
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .partition(|p| p.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('=')));

    let eligible = if others.is_empty() { credentials } else { others };
    eligible.into_iter().map(String::from).collect()
}

#[track_caller]
fn header_str(
    headers: &HeaderMap,
    name: http::header::HeaderName,
) -> Result<Option<&str>, AuthError> {
    match headers.get(&name) {
        Some(value) => value
            .to_str()
            .map(Some)
            .map_err(|_| AuthError::CredentialMalformed {
                reason: "credential header is not valid UTF-8",
                location: ErrorLocation::from(Location::caller()),
            }),
        None => Ok(None),
    }
}

async fn handle_socket(mut socket: WebSocket, access: Result<AccessProjection, AuthError>) {
    let projection = match access {
        Ok(projection) => projection,
        Err(e) => {
            warn!("WebSocket authentication failed: {e}");
            close(&mut socket, close_code::POLICY, e.public_message()).await;
            return;
        }
    };

    let greeting = match serde_json::to_string(&ConnectedMessage::from(projection)) {
        Ok(greeting) => greeting,
        Err(e) => {
            error!("Failed to encode connection greeting: {e}");
            close(&mut socket, close_code::ERROR, "Internal error").await;
            return;
        }
    };

    info!(
        "WebSocket connected for tenant {} user {}",
        projection.tenant, projection.user
    );

    if socket.send(Message::Text(greeting.into())).await.is_err() {
        debug!("Client went away before greeting");
        return;
    }

    echo(&mut socket).await;
    debug!("WebSocket closed for user {}", projection.user);
}

/// Echo data frames until the client closes
async fn echo(socket: &mut WebSocket) {
    while let Some(message) = socket.recv().await {
        let reply = match message {
            Ok(Message::Text(text)) => Message::Text(text),
            Ok(Message::Binary(data)) => Message::Binary(data),
            Ok(Message::Close(_)) => break,
            // Ping/pong are answered by the protocol layer
            Ok(_) => continue,
            Err(e) => {
                debug!("WebSocket receive error: {e}");
                break;
            }
        };

        if socket.send(reply).await.is_err() {
            break;
        }
    }
}

async fn close(socket: &mut WebSocket, code: u16, reason: &'static str) {
    let frame = CloseFrame {
        code,
        reason: reason.into(),
    };

    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        debug!("Failed to send close frame: {e}");
    }
}
