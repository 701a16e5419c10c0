use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::route::AppRoute;
use crate::AppState;

/// Units of work the shell's command loop executes, queued through the
/// reducer and drained FIFO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum CommandIntent {
    Bootstrap,
    ConnectWallet { account_id: String },
    RestoreWalletSession,
    DisconnectWallet,
    RefreshStreams,
    ToggleAutoDeposit { stream_id: String, enabled: bool },
    CreateStream { request: CreateStreamRequest },
    Navigate { route: AppRoute },
}

/// Request body for stream creation, mirroring what the control API
/// accepts. Balances travel as stringified integer token units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStreamRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub receiver_id: String,
    pub token_name: String,
    pub initial_balance: String,
    pub tokens_per_tick: String,
    pub auto_deposit_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandErrorKind {
    MissingCredential,
    Unauthorized,
    Forbidden,
    Validation,
    ServiceUnavailable,
    RateLimited,
    Network,
    Decode,
    Unsupported,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandError {
    pub kind: CommandErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl CommandError {
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self {
            kind: CommandErrorKind::MissingCredential,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CommandErrorKind::Validation,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: CommandErrorKind::Unsupported,
            message: message.into(),
            retryable: false,
        }
    }
}

/// Map an HTTP failure onto the command error taxonomy. Status 0 is the
/// transport-failed case (no response at all).
pub fn classify_http_error(status: u16, code: Option<&str>, message: String) -> CommandError {
    let kind = match status {
        0 => CommandErrorKind::Network,
        401 => CommandErrorKind::Unauthorized,
        403 => CommandErrorKind::Forbidden,
        404 | 409 | 422 => CommandErrorKind::Validation,
        429 => CommandErrorKind::RateLimited,
        500..=599 => CommandErrorKind::ServiceUnavailable,
        _ => match code {
            Some("decode_failed") => CommandErrorKind::Decode,
            _ => CommandErrorKind::Unknown,
        },
    };
    let retryable = matches!(
        kind,
        CommandErrorKind::Network
            | CommandErrorKind::ServiceUnavailable
            | CommandErrorKind::RateLimited
    );
    CommandError {
        kind,
        message,
        retryable,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    AccessToken,
}

/// A planned HTTP call for one intent. The shell executes it; planning is
/// kept pure so it can be asserted on without a network.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpCommandRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub auth: AuthRequirement,
}

pub fn map_intent_to_http(
    intent: &CommandIntent,
    state: &AppState,
) -> Result<HttpCommandRequest, CommandError> {
    match intent {
        CommandIntent::ConnectWallet { account_id } => Ok(HttpCommandRequest {
            method: HttpMethod::Post,
            path: "/api/wallet/connect".to_string(),
            body: Some(json!({ "account_id": account_id })),
            auth: AuthRequirement::None,
        }),
        CommandIntent::RestoreWalletSession => Ok(HttpCommandRequest {
            method: HttpMethod::Get,
            path: "/api/wallet/session".to_string(),
            body: None,
            auth: AuthRequirement::AccessToken,
        }),
        CommandIntent::DisconnectWallet => Ok(HttpCommandRequest {
            method: HttpMethod::Post,
            path: "/api/wallet/disconnect".to_string(),
            body: None,
            auth: AuthRequirement::AccessToken,
        }),
        CommandIntent::RefreshStreams => {
            if state.wallet.access_token.is_none() {
                return Err(CommandError::missing_credential(
                    "wallet session is required to list streams",
                ));
            }
            Ok(HttpCommandRequest {
                method: HttpMethod::Get,
                path: "/api/streams".to_string(),
                body: None,
                auth: AuthRequirement::AccessToken,
            })
        }
        CommandIntent::ToggleAutoDeposit { stream_id, enabled } => {
            if state.wallet.access_token.is_none() {
                return Err(CommandError::missing_credential(
                    "wallet session is required to change auto-deposit",
                ));
            }
            Ok(HttpCommandRequest {
                method: HttpMethod::Post,
                path: format!(
                    "/api/streams/{}/auto-deposit",
                    encode_path_component(stream_id)
                ),
                body: Some(json!({ "enabled": enabled })),
                auth: AuthRequirement::AccessToken,
            })
        }
        CommandIntent::CreateStream { request } => {
            if state.wallet.access_token.is_none() {
                return Err(CommandError::missing_credential(
                    "wallet session is required to create a stream",
                ));
            }
            let body = serde_json::to_value(request).map_err(|error| CommandError {
                kind: CommandErrorKind::Decode,
                message: format!("failed to encode create-stream request: {error}"),
                retryable: false,
            })?;
            Ok(HttpCommandRequest {
                method: HttpMethod::Post,
                path: "/api/streams".to_string(),
                body: Some(body),
                auth: AuthRequirement::AccessToken,
            })
        }
        CommandIntent::Bootstrap | CommandIntent::Navigate { .. } => Err(
            CommandError::unsupported("intent does not map to an HTTP request"),
        ),
    }
}

/// Percent-encode a path segment. Identifiers are opaque strings from the
/// API, so anything outside the unreserved set is escaped.
pub fn encode_path_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push('%');
                encoded.push(char::from_digit(u32::from(other >> 4), 16).unwrap_or('0'));
                encoded.push(char::from_digit(u32::from(other & 0x0f), 16).unwrap_or('0'));
            }
        }
    }
    encoded
}

pub fn intent_label(intent: &CommandIntent) -> &'static str {
    match intent {
        CommandIntent::Bootstrap => "bootstrap",
        CommandIntent::ConnectWallet { .. } => "connect_wallet",
        CommandIntent::RestoreWalletSession => "restore_wallet_session",
        CommandIntent::DisconnectWallet => "disconnect_wallet",
        CommandIntent::RefreshStreams => "refresh_streams",
        CommandIntent::ToggleAutoDeposit { .. } => "toggle_auto_deposit",
        CommandIntent::CreateStream { .. } => "create_stream",
        CommandIntent::Navigate { .. } => "navigate",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLatencyMetric {
    pub intent: String,
    pub latency_ms: u64,
    pub success: bool,
    pub error_kind: Option<CommandErrorKind>,
}

pub fn command_latency_metric(
    intent: &CommandIntent,
    latency_ms: u64,
    outcome: Result<(), &CommandError>,
) -> CommandLatencyMetric {
    match outcome {
        Ok(()) => CommandLatencyMetric {
            intent: intent_label(intent).to_string(),
            latency_ms,
            success: true,
            error_kind: None,
        },
        Err(error) => CommandLatencyMetric {
            intent: intent_label(intent).to_string(),
            latency_ms,
            success: false,
            error_kind: Some(error.kind.clone()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AppAction, WalletAuthStatus};

    fn signed_in_state() -> AppState {
        let mut state = AppState::default();
        let _ = crate::apply_action(
            &mut state,
            AppAction::WalletSessionEstablished {
                account_id: "alice.near".to_string(),
                access_token: "token-1".to_string(),
            },
        );
        assert_eq!(state.wallet.status, WalletAuthStatus::SignedIn);
        state
    }

    #[test]
    fn toggle_maps_to_auto_deposit_endpoint() {
        let state = signed_in_state();
        let request = map_intent_to_http(
            &CommandIntent::ToggleAutoDeposit {
                stream_id: "s one".to_string(),
                enabled: true,
            },
            &state,
        )
        .expect("request");
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/streams/s%20one/auto-deposit");
        assert_eq!(request.body, Some(json!({ "enabled": true })));
        assert_eq!(request.auth, AuthRequirement::AccessToken);
    }

    #[test]
    fn stream_commands_require_a_session() {
        let state = AppState::default();
        let error = map_intent_to_http(&CommandIntent::RefreshStreams, &state)
            .expect_err("missing credential");
        assert_eq!(error.kind, CommandErrorKind::MissingCredential);
    }

    #[test]
    fn connect_is_anonymous() {
        let state = AppState::default();
        let request = map_intent_to_http(
            &CommandIntent::ConnectWallet {
                account_id: "alice.near".to_string(),
            },
            &state,
        )
        .expect("request");
        assert_eq!(request.auth, AuthRequirement::None);
        assert_eq!(request.path, "/api/wallet/connect");
    }

    #[test]
    fn navigate_has_no_http_mapping() {
        let state = AppState::default();
        let error = map_intent_to_http(
            &CommandIntent::Navigate {
                route: AppRoute::Send,
            },
            &state,
        )
        .expect_err("unsupported");
        assert_eq!(error.kind, CommandErrorKind::Unsupported);
    }

    #[test]
    fn classifies_common_statuses() {
        assert_eq!(
            classify_http_error(401, None, "no".to_string()).kind,
            CommandErrorKind::Unauthorized
        );
        assert_eq!(
            classify_http_error(503, None, "down".to_string()).kind,
            CommandErrorKind::ServiceUnavailable
        );
        assert!(classify_http_error(503, None, "down".to_string()).retryable);
        assert_eq!(
            classify_http_error(0, Some("network_error"), "offline".to_string()).kind,
            CommandErrorKind::Network
        );
        assert_eq!(
            classify_http_error(200, Some("decode_failed"), "bad json".to_string()).kind,
            CommandErrorKind::Decode
        );
    }

    #[test]
    fn metric_carries_error_kind_on_failure() {
        let error = CommandError::validation("bad input");
        let metric = command_latency_metric(
            &CommandIntent::RefreshStreams,
            42,
            Err(&error),
        );
        assert_eq!(metric.intent, "refresh_streams");
        assert!(!metric.success);
        assert_eq!(metric.error_kind, Some(CommandErrorKind::Validation));
    }
}
