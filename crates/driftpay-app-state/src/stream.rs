use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment stream as reported by the control API.
///
/// `Interrupted` and `Finished` are terminal. Every other value, including
/// wire values this build does not know about, is treated as live: the
/// dead-check is an explicit enumeration, so an unrecognized status keeps
/// the stream controllable instead of failing the whole surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamStatus {
    Initialized,
    Active,
    Paused,
    Interrupted,
    Finished,
    #[serde(other)]
    Unknown,
}

impl StreamStatus {
    pub fn is_terminated(&self) -> bool {
        matches!(self, StreamStatus::Interrupted | StreamStatus::Finished)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StreamStatus::Initialized => "Initialized",
            StreamStatus::Active => "Active",
            StreamStatus::Paused => "Paused",
            StreamStatus::Interrupted => "Interrupted",
            StreamStatus::Finished => "Finished",
            StreamStatus::Unknown => "Unknown",
        }
    }
}

/// A payment stream record. Owned by the control API; the shell never
/// mutates one directly, only through auto-deposit commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub stream_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: String,
    #[serde(default)]
    pub receiver_id: String,
    #[serde(default)]
    pub token_name: String,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub tokens_per_tick: String,
    pub status: StreamStatus,
    #[serde(default)]
    pub auto_deposit_enabled: bool,
}

impl Stream {
    pub fn is_dead(&self) -> bool {
        self.status.is_terminated()
    }
}

pub const DEFAULT_ENABLE_LABEL: &str = "Enable";
pub const DEFAULT_DISABLE_LABEL: &str = "Disable";

/// The three mutually exclusive renderings of the auto-deposit control,
/// resolved once per render pass from the stream record and the control
/// handle's loading flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum AutoDepositView {
    Loading,
    Status {
        status: StreamStatus,
        label: String,
    },
    Toggle {
        label: String,
        /// Whether activating the toggle requests enabling auto-deposit.
        /// The inverse of the stream's current `auto_deposit_enabled`.
        enable: bool,
    },
}

/// Pure view selection for the auto-deposit control surface.
///
/// Loading wins over everything; a dead stream renders its terminal status
/// with no action offered; a live stream renders the toggle, labeled with
/// the action it performs. The label is recomputed from the stream record
/// on every call, never cached.
pub fn resolve_auto_deposit_view(
    stream: &Stream,
    loading: bool,
    enable_msg: Option<&str>,
    disable_msg: Option<&str>,
) -> AutoDepositView {
    if loading {
        return AutoDepositView::Loading;
    }

    if stream.is_dead() {
        let label = if stream.auto_deposit_enabled {
            enable_msg.unwrap_or("Enabled").to_string()
        } else {
            disable_msg.unwrap_or("Disabled").to_string()
        };
        return AutoDepositView::Status {
            status: stream.status,
            label,
        };
    }

    if stream.auto_deposit_enabled {
        AutoDepositView::Toggle {
            label: disable_msg.unwrap_or(DEFAULT_DISABLE_LABEL).to_string(),
            enable: false,
        }
    } else {
        AutoDepositView::Toggle {
            label: enable_msg.unwrap_or(DEFAULT_ENABLE_LABEL).to_string(),
            enable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stream(status: StreamStatus, auto_deposit_enabled: bool) -> Stream {
        Stream {
            stream_id: "s1".to_string(),
            description: None,
            owner_id: "alice.near".to_string(),
            receiver_id: "bob.near".to_string(),
            token_name: "NEAR".to_string(),
            balance: "1000000000000000000000000".to_string(),
            tokens_per_tick: "100".to_string(),
            status,
            auto_deposit_enabled,
        }
    }

    #[test]
    fn loading_wins_regardless_of_status_and_flag() {
        for status in [
            StreamStatus::Active,
            StreamStatus::Finished,
            StreamStatus::Interrupted,
            StreamStatus::Unknown,
        ] {
            for enabled in [true, false] {
                let view = resolve_auto_deposit_view(&stream(status, enabled), true, None, None);
                assert_eq!(view, AutoDepositView::Loading);
            }
        }
    }

    #[test]
    fn dead_stream_renders_status_without_toggle() {
        for status in [StreamStatus::Interrupted, StreamStatus::Finished] {
            let view = resolve_auto_deposit_view(&stream(status, true), false, None, None);
            match view {
                AutoDepositView::Status { status: got, label } => {
                    assert_eq!(got, status);
                    assert_eq!(label, "Enabled");
                }
                other => panic!("expected status view, got {other:?}"),
            }
        }
    }

    #[test]
    fn live_stream_renders_toggle_with_action_label() {
        let view = resolve_auto_deposit_view(&stream(StreamStatus::Active, false), false, None, None);
        assert_eq!(
            view,
            AutoDepositView::Toggle {
                label: "Enable".to_string(),
                enable: true,
            }
        );

        let view = resolve_auto_deposit_view(&stream(StreamStatus::Active, true), false, None, None);
        assert_eq!(
            view,
            AutoDepositView::Toggle {
                label: "Disable".to_string(),
                enable: false,
            }
        );
    }

    #[test]
    fn custom_messages_override_default_labels() {
        let view = resolve_auto_deposit_view(
            &stream(StreamStatus::Active, true),
            false,
            Some("Turn on"),
            Some("Turn off"),
        );
        assert_eq!(
            view,
            AutoDepositView::Toggle {
                label: "Turn off".to_string(),
                enable: false,
            }
        );
    }

    #[test]
    fn paused_initialized_and_unknown_count_as_live() {
        for status in [
            StreamStatus::Initialized,
            StreamStatus::Paused,
            StreamStatus::Unknown,
        ] {
            let view = resolve_auto_deposit_view(&stream(status, false), false, None, None);
            assert!(matches!(view, AutoDepositView::Toggle { .. }));
        }
    }

    #[test]
    fn finished_stream_scenario() {
        let subject = Stream {
            stream_id: "s2".to_string(),
            ..stream(StreamStatus::Finished, true)
        };
        let view = resolve_auto_deposit_view(&subject, false, None, None);
        assert!(matches!(view, AutoDepositView::Status { .. }));
    }

    #[test]
    fn decodes_wire_stream_with_unknown_status_as_live() {
        let decoded: Stream = serde_json::from_value(json!({
            "stream_id": "s3",
            "status": "ARCHIVED",
            "auto_deposit_enabled": false
        }))
        .unwrap();
        assert_eq!(decoded.status, StreamStatus::Unknown);
        assert!(!decoded.is_dead());
    }

    #[test]
    fn decodes_wire_stream_with_screaming_status() {
        let decoded: Stream = serde_json::from_value(json!({
            "stream_id": "s4",
            "description": "rent",
            "owner_id": "alice.near",
            "receiver_id": "bob.near",
            "token_name": "NEAR",
            "balance": "250",
            "tokens_per_tick": "10",
            "status": "INTERRUPTED",
            "auto_deposit_enabled": true
        }))
        .unwrap();
        assert_eq!(decoded.status, StreamStatus::Interrupted);
        assert!(decoded.is_dead());
    }
}
