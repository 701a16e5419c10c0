//! Pure application state for the Driftpay web shell.
//!
//! Everything in this crate is DOM-free and side-effect-free: the shell
//! queues [`CommandIntent`]s through [`apply_action`], drains them in its
//! command loop, and reports outcomes back as actions. State snapshots
//! serialize to JSON for the shell's diagnostic exports.

mod command;
mod route;
mod stream;

use std::collections::BTreeSet;

use serde::Serialize;

pub use command::{
    classify_http_error, command_latency_metric, encode_path_component, intent_label,
    AuthRequirement, CommandError, CommandErrorKind, CommandIntent, CommandLatencyMetric,
    CreateStreamRequest, HttpCommandRequest, HttpMethod, map_intent_to_http,
};
pub use route::AppRoute;
pub use stream::{
    resolve_auto_deposit_view, AutoDepositView, Stream, StreamStatus, DEFAULT_DISABLE_LABEL,
    DEFAULT_ENABLE_LABEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletAuthStatus {
    SignedOut,
    Connecting,
    Restoring,
    SignedIn,
    ReauthRequired,
}

/// Wallet session state. The access token is a bearer credential minted by
/// the control API on connect; cryptographic signing stays on the wallet
/// side and never enters the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletState {
    pub status: WalletAuthStatus,
    pub account_id: Option<String>,
    pub access_token: Option<String>,
    pub last_error: Option<String>,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            status: WalletAuthStatus::SignedOut,
            account_id: None,
            access_token: None,
            last_error: None,
        }
    }
}

impl WalletState {
    pub fn has_active_session(&self) -> bool {
        self.status == WalletAuthStatus::SignedIn && self.access_token.is_some()
    }
}

/// Stream collection plus per-stream toggle bookkeeping. A stream id in
/// `toggles_in_flight` is the control handle's `loading` flag for that
/// stream; a second toggle for the same stream is dropped at queue time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamsState {
    pub streams: Vec<Stream>,
    pub loaded: bool,
    pub toggles_in_flight: BTreeSet<String>,
    pub last_error: Option<String>,
}

impl StreamsState {
    pub fn toggle_in_flight(&self, stream_id: &str) -> bool {
        self.toggles_in_flight.contains(stream_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueuedIntent {
    pub id: u64,
    pub intent: CommandIntent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub route: AppRoute,
    pub wallet: WalletState,
    pub streams: StreamsState,
    pub intent_queue: Vec<QueuedIntent>,
    next_intent_id: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            route: AppRoute::default(),
            wallet: WalletState::default(),
            streams: StreamsState::default(),
            intent_queue: Vec::new(),
            next_intent_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    BootstrapFromPath { path: String },
    Navigate { route: AppRoute },
    QueueIntent { intent: CommandIntent },
    DrainIntents,
    IntentCompleted { id: u64 },
    IntentFailed { id: u64, message: String },
    WalletConnectRequested { account_id: String },
    WalletSessionRestoreRequested,
    WalletSessionEstablished { account_id: String, access_token: String },
    WalletReauthRequired { message: String },
    WalletSignedOut,
    WalletAuthFailed { message: String },
    StreamsLoaded { streams: Vec<Stream> },
    StreamsLoadFailed { message: String },
    AutoDepositToggleSettled { stream_id: String },
    AutoDepositToggleFailed { stream_id: String, message: String },
}

/// What a reducer step handed back to the caller. `drained_intents` is
/// non-empty only for [`AppAction::DrainIntents`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionEffect {
    pub drained_intents: Vec<QueuedIntent>,
    pub changed: bool,
}

pub fn apply_action(state: &mut AppState, action: AppAction) -> ActionEffect {
    let mut effect = ActionEffect {
        drained_intents: Vec::new(),
        changed: true,
    };

    match action {
        AppAction::BootstrapFromPath { path } => {
            state.route = AppRoute::from_path(&path);
        }
        AppAction::Navigate { route } => {
            state.route = route;
        }
        AppAction::QueueIntent { intent } => {
            if let CommandIntent::ToggleAutoDeposit { stream_id, .. } = &intent {
                if state.streams.toggle_in_flight(stream_id) {
                    effect.changed = false;
                    return effect;
                }
                state
                    .streams
                    .toggles_in_flight
                    .insert(stream_id.clone());
            }
            let id = state.next_intent_id;
            state.next_intent_id = state.next_intent_id.saturating_add(1);
            state.intent_queue.push(QueuedIntent { id, intent });
        }
        AppAction::DrainIntents => {
            effect.drained_intents = std::mem::take(&mut state.intent_queue);
            effect.changed = !effect.drained_intents.is_empty();
        }
        AppAction::IntentCompleted { .. } => {}
        AppAction::IntentFailed { .. } => {}
        AppAction::WalletConnectRequested { account_id } => {
            state.wallet.status = WalletAuthStatus::Connecting;
            state.wallet.account_id = Some(account_id);
            state.wallet.last_error = None;
        }
        AppAction::WalletSessionRestoreRequested => {
            state.wallet.status = WalletAuthStatus::Restoring;
            state.wallet.last_error = None;
        }
        AppAction::WalletSessionEstablished {
            account_id,
            access_token,
        } => {
            state.wallet.status = WalletAuthStatus::SignedIn;
            state.wallet.account_id = Some(account_id);
            state.wallet.access_token = Some(access_token);
            state.wallet.last_error = None;
        }
        AppAction::WalletReauthRequired { message } => {
            state.wallet.status = WalletAuthStatus::ReauthRequired;
            state.wallet.access_token = None;
            state.wallet.last_error = Some(message);
        }
        AppAction::WalletSignedOut => {
            state.wallet = WalletState::default();
            state.streams = StreamsState::default();
        }
        AppAction::WalletAuthFailed { message } => {
            if state.wallet.has_active_session()
                || state.wallet.status == WalletAuthStatus::ReauthRequired
            {
                state.wallet.last_error = Some(message);
            } else {
                state.wallet.status = WalletAuthStatus::SignedOut;
                state.wallet.access_token = None;
                state.wallet.last_error = Some(message);
            }
        }
        AppAction::StreamsLoaded { streams } => {
            state.streams.streams = streams;
            state.streams.loaded = true;
            state.streams.last_error = None;
        }
        AppAction::StreamsLoadFailed { message } => {
            state.streams.loaded = true;
            state.streams.last_error = Some(message);
        }
        AppAction::AutoDepositToggleSettled { stream_id } => {
            state.streams.toggles_in_flight.remove(&stream_id);
        }
        AppAction::AutoDepositToggleFailed { stream_id, message } => {
            state.streams.toggles_in_flight.remove(&stream_id);
            state.streams.last_error = Some(message);
        }
    }

    effect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_in(state: &mut AppState) {
        let _ = apply_action(
            state,
            AppAction::WalletSessionEstablished {
                account_id: "alice.near".to_string(),
                access_token: "token-1".to_string(),
            },
        );
    }

    #[test]
    fn bootstrap_resolves_route_from_path() {
        let mut state = AppState::default();
        let _ = apply_action(
            &mut state,
            AppAction::BootstrapFromPath {
                path: "/send".to_string(),
            },
        );
        assert_eq!(state.route, AppRoute::Send);
    }

    #[test]
    fn queue_and_drain_preserves_fifo_order() {
        let mut state = AppState::default();
        sign_in(&mut state);
        let _ = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::RefreshStreams,
            },
        );
        let _ = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::Navigate {
                    route: AppRoute::Send,
                },
            },
        );

        let effect = apply_action(&mut state, AppAction::DrainIntents);
        assert_eq!(effect.drained_intents.len(), 2);
        assert_eq!(
            effect.drained_intents[0].intent,
            CommandIntent::RefreshStreams
        );
        assert!(effect.drained_intents[0].id < effect.drained_intents[1].id);
        assert!(state.intent_queue.is_empty());
    }

    #[test]
    fn duplicate_toggle_for_same_stream_is_dropped_while_in_flight() {
        let mut state = AppState::default();
        sign_in(&mut state);

        let first = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: true,
                },
            },
        );
        assert!(first.changed);
        assert!(state.streams.toggle_in_flight("s1"));

        let second = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: false,
                },
            },
        );
        assert!(!second.changed);
        assert_eq!(state.intent_queue.len(), 1);

        let other_stream = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s2".to_string(),
                    enabled: true,
                },
            },
        );
        assert!(other_stream.changed);
        assert_eq!(state.intent_queue.len(), 2);
    }

    #[test]
    fn settled_toggle_clears_loading_and_allows_requeue() {
        let mut state = AppState::default();
        sign_in(&mut state);
        let _ = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: true,
                },
            },
        );
        let _ = apply_action(&mut state, AppAction::DrainIntents);
        let _ = apply_action(
            &mut state,
            AppAction::AutoDepositToggleSettled {
                stream_id: "s1".to_string(),
            },
        );
        assert!(!state.streams.toggle_in_flight("s1"));

        let requeued = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: false,
                },
            },
        );
        assert!(requeued.changed);
    }

    #[test]
    fn wallet_lifecycle_transitions() {
        let mut state = AppState::default();
        let _ = apply_action(
            &mut state,
            AppAction::WalletConnectRequested {
                account_id: "alice.near".to_string(),
            },
        );
        assert_eq!(state.wallet.status, WalletAuthStatus::Connecting);
        assert!(!state.wallet.has_active_session());

        sign_in(&mut state);
        assert!(state.wallet.has_active_session());

        let _ = apply_action(
            &mut state,
            AppAction::WalletReauthRequired {
                message: "session expired".to_string(),
            },
        );
        assert_eq!(state.wallet.status, WalletAuthStatus::ReauthRequired);
        assert!(state.wallet.access_token.is_none());
    }

    #[test]
    fn signing_out_clears_streams() {
        let mut state = AppState::default();
        sign_in(&mut state);
        let _ = apply_action(
            &mut state,
            AppAction::StreamsLoaded {
                streams: vec![Stream {
                    stream_id: "s1".to_string(),
                    description: None,
                    owner_id: "alice.near".to_string(),
                    receiver_id: "bob.near".to_string(),
                    token_name: "NEAR".to_string(),
                    balance: "10".to_string(),
                    tokens_per_tick: "1".to_string(),
                    status: StreamStatus::Active,
                    auto_deposit_enabled: false,
                }],
            },
        );
        assert_eq!(state.streams.streams.len(), 1);

        let _ = apply_action(&mut state, AppAction::WalletSignedOut);
        assert!(state.streams.streams.is_empty());
        assert!(!state.streams.loaded);
        assert_eq!(state.wallet.status, WalletAuthStatus::SignedOut);
    }

    #[test]
    fn auth_failure_outside_session_signs_out() {
        let mut state = AppState::default();
        let _ = apply_action(
            &mut state,
            AppAction::WalletConnectRequested {
                account_id: "alice.near".to_string(),
            },
        );
        let _ = apply_action(
            &mut state,
            AppAction::WalletAuthFailed {
                message: "connect rejected".to_string(),
            },
        );
        assert_eq!(state.wallet.status, WalletAuthStatus::SignedOut);
        assert_eq!(
            state.wallet.last_error.as_deref(),
            Some("connect rejected")
        );
    }

    #[test]
    fn failed_toggle_clears_loading_and_records_error() {
        let mut state = AppState::default();
        sign_in(&mut state);
        let _ = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: true,
                },
            },
        );
        let _ = apply_action(
            &mut state,
            AppAction::AutoDepositToggleFailed {
                stream_id: "s1".to_string(),
                message: "service unavailable".to_string(),
            },
        );
        assert!(!state.streams.toggle_in_flight("s1"));
        assert_eq!(
            state.streams.last_error.as_deref(),
            Some("service unavailable")
        );
    }

    #[test]
    fn state_snapshot_serializes() {
        let mut state = AppState::default();
        sign_in(&mut state);
        let snapshot = serde_json::to_value(&state).expect("snapshot");
        assert_eq!(snapshot["route"], "my_streams");
        assert_eq!(snapshot["wallet"]["status"], "signed_in");
    }
}
