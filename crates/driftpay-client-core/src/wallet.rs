use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTROL_BASE_URL: &str = "http://127.0.0.1:8799";
pub const ENV_CONTROL_BASE_URL: &str = "DRIFTPAY_CONTROL_BASE_URL";

pub const MIN_ACCOUNT_ID_LEN: usize = 2;
pub const MAX_ACCOUNT_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletInputError {
    #[error("base url must not be empty")]
    EmptyBaseUrl,
    #[error("base url must use http:// or https:// and include a host")]
    InvalidBaseUrl,
    #[error("account id must not be empty")]
    EmptyAccountId,
    #[error("account id must be {MIN_ACCOUNT_ID_LEN}-{MAX_ACCOUNT_ID_LEN} characters")]
    AccountIdLength,
    #[error("account id may contain lowercase letters, digits, and non-adjacent . _ - separators")]
    InvalidAccountId,
}

/// Persisted wallet session. Written to browser storage on connect,
/// reloaded and re-validated against the control API at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSessionState {
    pub account_id: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<String>,
}

pub trait WalletStateStore {
    type Error;

    fn load_wallet_state(&self) -> Result<Option<WalletSessionState>, Self::Error>;
    fn persist_wallet_state(&self, state: &WalletSessionState) -> Result<(), Self::Error>;
    fn clear_wallet_state(&self) -> Result<(), Self::Error>;
}

#[async_trait]
pub trait WalletApiTransport {
    type Error;

    async fn connect_wallet(&self, account_id: &str) -> Result<WalletSessionState, Self::Error>;
    async fn current_session(&self, access_token: &str) -> Result<WalletSessionState, Self::Error>;
    async fn disconnect_wallet(&self, access_token: &str) -> Result<(), Self::Error>;
}

pub fn resolve_control_base_url() -> Result<(String, &'static str), WalletInputError> {
    if let Some(base_url) = env_non_empty(ENV_CONTROL_BASE_URL) {
        return normalize_base_url(&base_url).map(|normalized| (normalized, ENV_CONTROL_BASE_URL));
    }
    normalize_base_url(DEFAULT_CONTROL_BASE_URL).map(|normalized| (normalized, "default_local"))
}

pub fn normalize_base_url(raw: &str) -> Result<String, WalletInputError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(WalletInputError::EmptyBaseUrl);
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(WalletInputError::InvalidBaseUrl);
    }
    let Some((_, remainder)) = trimmed.split_once("://") else {
        return Err(WalletInputError::InvalidBaseUrl);
    };
    if remainder.trim().is_empty() || remainder.starts_with('/') {
        return Err(WalletInputError::InvalidBaseUrl);
    }
    Ok(trimmed.to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
}

/// Normalize a wallet account id: lowercase, length-bounded, with `.`,
/// `_`, and `-` allowed only between alphanumeric runs.
pub fn normalize_account_id(raw: &str) -> Result<String, WalletInputError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(WalletInputError::EmptyAccountId);
    }
    if normalized.len() < MIN_ACCOUNT_ID_LEN || normalized.len() > MAX_ACCOUNT_ID_LEN {
        return Err(WalletInputError::AccountIdLength);
    }

    let mut previous_was_separator = true;
    for ch in normalized.chars() {
        match ch {
            'a'..='z' | '0'..='9' => previous_was_separator = false,
            '.' | '_' | '-' => {
                if previous_was_separator {
                    return Err(WalletInputError::InvalidAccountId);
                }
                previous_was_separator = true;
            }
            _ => return Err(WalletInputError::InvalidAccountId),
        }
    }
    if previous_was_separator {
        return Err(WalletInputError::InvalidAccountId);
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn with_env<T>(value: Option<&str>, test: impl FnOnce() -> T) -> T {
        let lock = ENV_LOCK.get_or_init(|| Mutex::new(()));
        let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let previous = std::env::var(ENV_CONTROL_BASE_URL).ok();
        if let Some(value) = value {
            unsafe { std::env::set_var(ENV_CONTROL_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_CONTROL_BASE_URL) };
        }

        let result = test();

        if let Some(value) = previous {
            unsafe { std::env::set_var(ENV_CONTROL_BASE_URL, value) };
        } else {
            unsafe { std::env::remove_var(ENV_CONTROL_BASE_URL) };
        }

        result
    }

    #[test]
    fn normalize_base_url_trims_and_drops_trailing_slash() {
        let normalized = normalize_base_url(" https://driftpay.app/ ").expect("valid base url");
        assert_eq!(normalized, "https://driftpay.app");
    }

    #[test]
    fn normalize_base_url_requires_http_scheme() {
        let error = normalize_base_url("driftpay.app").expect_err("expected invalid url");
        assert_eq!(error, WalletInputError::InvalidBaseUrl);
    }

    #[test]
    fn resolve_control_base_url_defaults_local() {
        with_env(None, || {
            let (resolved, source) = resolve_control_base_url().expect("default local url");
            assert_eq!(resolved, DEFAULT_CONTROL_BASE_URL);
            assert_eq!(source, "default_local");
        });
    }

    #[test]
    fn resolve_control_base_url_prefers_env() {
        with_env(Some("https://staging.driftpay.app/"), || {
            let (resolved, source) = resolve_control_base_url().expect("env url");
            assert_eq!(resolved, "https://staging.driftpay.app");
            assert_eq!(source, ENV_CONTROL_BASE_URL);
        });
    }

    #[test]
    fn account_id_lowercases_and_trims() {
        let normalized = normalize_account_id("  Alice.Near ").expect("valid account");
        assert_eq!(normalized, "alice.near");
    }

    #[test]
    fn account_id_rejects_adjacent_or_edge_separators() {
        for raw in [".alice", "alice.", "ali..ce", "ali.-ce", "-alice"] {
            let error = normalize_account_id(raw).expect_err("expected invalid account");
            assert_eq!(error, WalletInputError::InvalidAccountId);
        }
    }

    #[test]
    fn account_id_rejects_bad_lengths() {
        assert_eq!(
            normalize_account_id("a").expect_err("too short"),
            WalletInputError::AccountIdLength
        );
        let long = "a".repeat(MAX_ACCOUNT_ID_LEN + 1);
        assert_eq!(
            normalize_account_id(&long).expect_err("too long"),
            WalletInputError::AccountIdLength
        );
    }

    #[test]
    fn account_id_rejects_empty_input() {
        let error = normalize_account_id("   ").expect_err("expected error");
        assert_eq!(error, WalletInputError::EmptyAccountId);
    }
}
