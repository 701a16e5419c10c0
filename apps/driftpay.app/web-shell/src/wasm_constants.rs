use web_time::Duration;

pub(crate) const WALLET_STORAGE_KEY: &str = "driftpay.web.wallet.v1";
pub(crate) const STREAMS_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub(crate) const HEADER_BREAKPOINT_PX: u32 = 1024;

pub(crate) const SHELL_STATUS_ID: &str = "driftpay-web-shell-status";
pub(crate) const SHELL_STYLE_ID: &str = "driftpay-web-shell-style";
pub(crate) const HEADER_ROOT_ID: &str = "driftpay-web-shell-header";
pub(crate) const HEADER_DESKTOP_ID: &str = "driftpay-web-shell-header-desktop";
pub(crate) const HEADER_MOBILE_ID: &str = "driftpay-web-shell-header-mobile";
pub(crate) const HEADER_MOBILE_TOGGLE_ID: &str = "driftpay-web-shell-header-toggle";
pub(crate) const HEADER_MOBILE_PANEL_ID: &str = "driftpay-web-shell-header-panel";
pub(crate) const AUTH_SLOT_DESKTOP_ID: &str = "driftpay-web-shell-auth-desktop";
pub(crate) const AUTH_SLOT_MOBILE_ID: &str = "driftpay-web-shell-auth-mobile";
pub(crate) const AUTH_ACCOUNT_INPUT_CLASS: &str = "driftpay-auth-account-input";
pub(crate) const MAIN_ROOT_ID: &str = "driftpay-web-shell-main";
pub(crate) const STREAMS_ROOT_ID: &str = "driftpay-web-shell-streams";
pub(crate) const STREAMS_CARDS_ID: &str = "driftpay-web-shell-streams-cards";
pub(crate) const SEND_ROOT_ID: &str = "driftpay-web-shell-send";
pub(crate) const SEND_STATUS_ID: &str = "driftpay-web-shell-send-status";
pub(crate) const SEND_DESCRIPTION_ID: &str = "driftpay-web-shell-send-description";
pub(crate) const SEND_RECEIVER_ID: &str = "driftpay-web-shell-send-receiver";
pub(crate) const SEND_TOKEN_ID: &str = "driftpay-web-shell-send-token";
pub(crate) const SEND_BALANCE_ID: &str = "driftpay-web-shell-send-balance";
pub(crate) const SEND_TOKENS_PER_TICK_ID: &str = "driftpay-web-shell-send-tokens-per-tick";
pub(crate) const SEND_AUTO_DEPOSIT_ID: &str = "driftpay-web-shell-send-auto-deposit";
pub(crate) const SEND_SUBMIT_ID: &str = "driftpay-web-shell-send-submit";

pub(crate) const NAV_LINKS: [(&str, &str); 2] = [("My Streams", "/streams"), ("Send", "/send")];

pub(crate) const DOM_READY_BUDGET_MS: u64 = 450;
pub(crate) const BOOT_TOTAL_BUDGET_MS: u64 = 1_200;
