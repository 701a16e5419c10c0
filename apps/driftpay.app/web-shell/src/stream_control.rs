use driftpay_app_state::{
    resolve_auto_deposit_view, AppRoute, AutoDepositView, Stream, StreamsState, WalletState,
};
use driftpay_client_core::send::format_token_amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCardTone {
    Neutral,
    Info,
    Success,
    Warning,
    Error,
}

/// A rendered text card on a surface, in the shell's card idiom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceCard {
    pub title: String,
    pub body: String,
    pub tone: SurfaceCardTone,
}

/// One stream row on the My Streams surface: display text plus the
/// resolved auto-deposit control view for that stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamRow {
    pub stream_id: String,
    pub title: String,
    pub summary: String,
    pub view: AutoDepositView,
}

pub fn route_header_title(route: &AppRoute) -> String {
    match route {
        AppRoute::MyStreams => "My Streams".to_string(),
        AppRoute::Send => "Send".to_string(),
    }
}

/// Leading cards for the streams surface: sign-in prompt, load errors,
/// and the empty state. Stream rows render separately.
pub fn streams_surface_cards(wallet: &WalletState, streams: &StreamsState) -> Vec<SurfaceCard> {
    let mut cards = Vec::new();

    if !wallet.has_active_session() {
        let body = match wallet.last_error.as_ref() {
            Some(error) => format!("Connect a wallet to see your streams.\n{error}"),
            None => "Connect a wallet to see your streams.".to_string(),
        };
        cards.push(SurfaceCard {
            title: "Wallet".to_string(),
            body,
            tone: SurfaceCardTone::Warning,
        });
        return cards;
    }

    cards.push(SurfaceCard {
        title: "Wallet".to_string(),
        body: format!(
            "{} connected",
            wallet.account_id.as_deref().unwrap_or("unknown")
        ),
        tone: SurfaceCardTone::Success,
    });

    if let Some(error) = streams.last_error.as_ref() {
        cards.push(SurfaceCard {
            title: "Stream Load Error".to_string(),
            body: error.clone(),
            tone: SurfaceCardTone::Error,
        });
    }

    if !streams.loaded {
        cards.push(SurfaceCard {
            title: "Streams".to_string(),
            body: "Loading streams from the control service.".to_string(),
            tone: SurfaceCardTone::Info,
        });
    } else if streams.streams.is_empty() && streams.last_error.is_none() {
        cards.push(SurfaceCard {
            title: "Streams".to_string(),
            body: "No streams yet. Use Send to start one.".to_string(),
            tone: SurfaceCardTone::Neutral,
        });
    }

    cards
}

/// Resolve every stream into a display row. The per-stream loading flag
/// comes from the toggle bookkeeping, so a row whose toggle is in flight
/// renders the loading view.
pub fn stream_rows(streams: &StreamsState) -> Vec<StreamRow> {
    streams
        .streams
        .iter()
        .map(|stream| {
            let loading = streams.toggle_in_flight(&stream.stream_id);
            StreamRow {
                stream_id: stream.stream_id.clone(),
                title: stream_title(stream),
                summary: stream_summary(stream),
                view: resolve_auto_deposit_view(stream, loading, None, None),
            }
        })
        .collect()
}

fn stream_title(stream: &Stream) -> String {
    match stream.description.as_ref() {
        Some(description) => format!("{description} -> {}", stream.receiver_id),
        None => format!("-> {}", stream.receiver_id),
    }
}

fn stream_summary(stream: &Stream) -> String {
    let balance = format_token_amount(&stream.balance)
        .unwrap_or_else(|| stream.balance.clone());
    let rate = format_token_amount(&stream.tokens_per_tick)
        .unwrap_or_else(|| stream.tokens_per_tick.clone());
    format!(
        "{} | balance {balance} {token} | {rate} {token}/tick",
        stream.status.label(),
        token = stream.token_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftpay_app_state::{
        apply_action, AppAction, AppState, CommandIntent, StreamStatus,
    };

    fn stream(id: &str, status: StreamStatus, auto_deposit_enabled: bool) -> Stream {
        Stream {
            stream_id: id.to_string(),
            description: Some("rent".to_string()),
            owner_id: "alice.near".to_string(),
            receiver_id: "bob.near".to_string(),
            token_name: "NEAR".to_string(),
            balance: "2500000000000000000000000".to_string(),
            tokens_per_tick: "1000000000000000000000".to_string(),
            status,
            auto_deposit_enabled,
        }
    }

    fn signed_in_with(streams: Vec<Stream>) -> AppState {
        let mut state = AppState::default();
        let _ = apply_action(
            &mut state,
            AppAction::WalletSessionEstablished {
                account_id: "alice.near".to_string(),
                access_token: "token-1".to_string(),
            },
        );
        let _ = apply_action(&mut state, AppAction::StreamsLoaded { streams });
        state
    }

    #[test]
    fn signed_out_surface_prompts_for_wallet() {
        let state = AppState::default();
        let cards = streams_surface_cards(&state.wallet, &state.streams);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Wallet");
        assert_eq!(cards[0].tone, SurfaceCardTone::Warning);
    }

    #[test]
    fn unloaded_surface_shows_loading_card() {
        let mut state = AppState::default();
        let _ = apply_action(
            &mut state,
            AppAction::WalletSessionEstablished {
                account_id: "alice.near".to_string(),
                access_token: "token-1".to_string(),
            },
        );
        let cards = streams_surface_cards(&state.wallet, &state.streams);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].tone, SurfaceCardTone::Success);
        assert_eq!(cards[1].tone, SurfaceCardTone::Info);
    }

    #[test]
    fn empty_loaded_surface_shows_empty_card() {
        let state = signed_in_with(Vec::new());
        let cards = streams_surface_cards(&state.wallet, &state.streams);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].body, "alice.near connected");
        assert_eq!(cards[1].tone, SurfaceCardTone::Neutral);
    }

    #[test]
    fn load_error_surfaces_as_error_card() {
        let mut state = signed_in_with(Vec::new());
        let _ = apply_action(
            &mut state,
            AppAction::StreamsLoadFailed {
                message: "control service unavailable".to_string(),
            },
        );
        let cards = streams_surface_cards(&state.wallet, &state.streams);
        assert_eq!(cards[1].title, "Stream Load Error");
        assert_eq!(cards[1].tone, SurfaceCardTone::Error);
    }

    #[test]
    fn active_disabled_stream_renders_enable_toggle() {
        let state = signed_in_with(vec![stream("s1", StreamStatus::Active, false)]);
        let rows = stream_rows(&state.streams);
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].view,
            AutoDepositView::Toggle {
                label: "Enable".to_string(),
                enable: true,
            }
        );
    }

    #[test]
    fn finished_stream_renders_status_not_toggle() {
        let state = signed_in_with(vec![stream("s2", StreamStatus::Finished, true)]);
        let rows = stream_rows(&state.streams);
        assert!(matches!(rows[0].view, AutoDepositView::Status { .. }));
    }

    #[test]
    fn in_flight_toggle_renders_loading_row() {
        let mut state = signed_in_with(vec![stream("s1", StreamStatus::Active, true)]);
        let _ = apply_action(
            &mut state,
            AppAction::QueueIntent {
                intent: CommandIntent::ToggleAutoDeposit {
                    stream_id: "s1".to_string(),
                    enabled: false,
                },
            },
        );
        let rows = stream_rows(&state.streams);
        assert_eq!(rows[0].view, AutoDepositView::Loading);
    }

    #[test]
    fn summary_formats_base_units_for_display() {
        let state = signed_in_with(vec![stream("s1", StreamStatus::Active, false)]);
        let rows = stream_rows(&state.streams);
        assert_eq!(rows[0].title, "rent -> bob.near");
        assert_eq!(rows[0].summary, "Active | balance 2.5 NEAR | 0.001 NEAR/tick");
    }

    #[test]
    fn header_titles_match_routes() {
        assert_eq!(route_header_title(&AppRoute::MyStreams), "My Streams");
        assert_eq!(route_header_title(&AppRoute::Send), "Send");
    }
}
