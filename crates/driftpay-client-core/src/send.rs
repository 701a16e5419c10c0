use crate::wallet::{normalize_account_id, WalletInputError};

/// Token names the control API accepts for new streams.
pub const SUPPORTED_TOKENS: [&str; 3] = ["NEAR", "DACHA", "TARAS"];

/// Fractional digits carried by on-chain token amounts. Amounts travel as
/// stringified integers in these base units.
pub const TOKEN_DECIMALS: u32 = 24;

pub const MAX_DESCRIPTION_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendInputError {
    #[error("receiver account is invalid: {0}")]
    InvalidReceiver(WalletInputError),
    #[error("unknown token name")]
    UnknownToken,
    #[error("amount must not be empty")]
    EmptyAmount,
    #[error("amount must be a positive decimal number")]
    InvalidAmount,
    #[error("amount has more than {TOKEN_DECIMALS} fractional digits")]
    TooManyFractionDigits,
    #[error("amount is too large")]
    AmountOverflow,
    #[error("description must be at most {MAX_DESCRIPTION_LEN} characters")]
    DescriptionTooLong,
}

/// A normalized create-stream form, ready to be turned into an API
/// request. Amounts are integer base-unit strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamDraft {
    pub description: Option<String>,
    pub receiver_id: String,
    pub token_name: String,
    pub initial_balance: String,
    pub tokens_per_tick: String,
    pub auto_deposit_enabled: bool,
}

pub fn normalize_stream_draft(
    description: &str,
    receiver: &str,
    token_name: &str,
    initial_balance: &str,
    tokens_per_tick: &str,
    auto_deposit_enabled: bool,
) -> Result<StreamDraft, SendInputError> {
    Ok(StreamDraft {
        description: normalize_description(description)?,
        receiver_id: normalize_account_id(receiver).map_err(SendInputError::InvalidReceiver)?,
        token_name: normalize_token_name(token_name)?,
        initial_balance: parse_token_amount(initial_balance)?,
        tokens_per_tick: parse_token_amount(tokens_per_tick)?,
        auto_deposit_enabled,
    })
}

pub fn normalize_description(raw: &str) -> Result<Option<String>, SendInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(SendInputError::DescriptionTooLong);
    }
    Ok(Some(trimmed.to_string()))
}

pub fn normalize_token_name(raw: &str) -> Result<String, SendInputError> {
    let normalized = raw.trim().to_uppercase();
    if SUPPORTED_TOKENS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        Err(SendInputError::UnknownToken)
    }
}

/// Parse a human-entered decimal amount ("1.5") into integer base units
/// ("1500000000000000000000000"). Zero and negative amounts are rejected.
pub fn parse_token_amount(raw: &str) -> Result<String, SendInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SendInputError::EmptyAmount);
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(SendInputError::InvalidAmount);
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
    {
        return Err(SendInputError::InvalidAmount);
    }
    if fraction.len() > TOKEN_DECIMALS as usize {
        return Err(SendInputError::TooManyFractionDigits);
    }

    let scale = 10u128
        .checked_pow(TOKEN_DECIMALS)
        .ok_or(SendInputError::AmountOverflow)?;
    let whole_units = if whole.is_empty() {
        0u128
    } else {
        whole
            .parse::<u128>()
            .map_err(|_| SendInputError::AmountOverflow)?
    };
    let scaled_whole = whole_units
        .checked_mul(scale)
        .ok_or(SendInputError::AmountOverflow)?;

    let fraction_units = if fraction.is_empty() {
        0u128
    } else {
        let padded = format!("{fraction:0<width$}", width = TOKEN_DECIMALS as usize);
        padded
            .parse::<u128>()
            .map_err(|_| SendInputError::AmountOverflow)?
    };

    let total = scaled_whole
        .checked_add(fraction_units)
        .ok_or(SendInputError::AmountOverflow)?;
    if total == 0 {
        return Err(SendInputError::InvalidAmount);
    }

    Ok(total.to_string())
}

/// Render integer base units back into a trimmed decimal string for
/// display. Returns `None` when the input is not an integer string.
pub fn format_token_amount(units: &str) -> Option<String> {
    let trimmed = units.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    let value = trimmed.parse::<u128>().ok()?;
    let scale = 10u128.checked_pow(TOKEN_DECIMALS)?;
    let whole = value / scale;
    let fraction = value % scale;
    if fraction == 0 {
        return Some(whole.to_string());
    }
    let fraction = format!("{fraction:0>width$}", width = TOKEN_DECIMALS as usize);
    let fraction = fraction.trim_end_matches('0');
    Some(format!("{whole}.{fraction}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_amounts() {
        assert_eq!(
            parse_token_amount("2").expect("amount"),
            "2000000000000000000000000"
        );
    }

    #[test]
    fn parses_fractional_amounts() {
        assert_eq!(
            parse_token_amount("1.5").expect("amount"),
            "1500000000000000000000000"
        );
        assert_eq!(parse_token_amount("0.000000000000000000000001").expect("amount"), "1");
        assert_eq!(parse_token_amount(".5").expect("amount"), "500000000000000000000000");
    }

    #[test]
    fn rejects_zero_and_garbage_amounts() {
        assert_eq!(
            parse_token_amount("0").expect_err("zero"),
            SendInputError::InvalidAmount
        );
        assert_eq!(
            parse_token_amount("0.0").expect_err("zero"),
            SendInputError::InvalidAmount
        );
        assert_eq!(
            parse_token_amount("-1").expect_err("negative"),
            SendInputError::InvalidAmount
        );
        assert_eq!(
            parse_token_amount("1.2.3").expect_err("garbage"),
            SendInputError::InvalidAmount
        );
        assert_eq!(
            parse_token_amount("  ").expect_err("empty"),
            SendInputError::EmptyAmount
        );
    }

    #[test]
    fn rejects_excess_precision() {
        let too_precise = format!("0.{}", "1".repeat(TOKEN_DECIMALS as usize + 1));
        assert_eq!(
            parse_token_amount(&too_precise).expect_err("precision"),
            SendInputError::TooManyFractionDigits
        );
    }

    #[test]
    fn format_round_trips_parse() {
        for raw in ["1", "1.5", "0.25", "12345.000000000000000000000001"] {
            let units = parse_token_amount(raw).expect("parse");
            assert_eq!(format_token_amount(&units).expect("format"), raw);
        }
    }

    #[test]
    fn format_rejects_non_numeric_input() {
        assert_eq!(format_token_amount("abc"), None);
        assert_eq!(format_token_amount(""), None);
    }

    #[test]
    fn token_names_are_upcased_and_whitelisted() {
        assert_eq!(normalize_token_name(" near ").expect("token"), "NEAR");
        assert_eq!(
            normalize_token_name("DOGE").expect_err("unknown"),
            SendInputError::UnknownToken
        );
    }

    #[test]
    fn draft_normalizes_every_field() {
        let draft = normalize_stream_draft(
            "  rent for may  ",
            " Bob.Near ",
            "near",
            "10",
            "0.001",
            true,
        )
        .expect("draft");
        assert_eq!(draft.description.as_deref(), Some("rent for may"));
        assert_eq!(draft.receiver_id, "bob.near");
        assert_eq!(draft.token_name, "NEAR");
        assert_eq!(draft.initial_balance, "10000000000000000000000000");
        assert_eq!(draft.tokens_per_tick, "1000000000000000000000");
        assert!(draft.auto_deposit_enabled);
    }

    #[test]
    fn draft_rejects_invalid_receiver() {
        let error = normalize_stream_draft("", "..bad", "NEAR", "1", "1", false)
            .expect_err("receiver");
        assert!(matches!(error, SendInputError::InvalidReceiver(_)));
    }

    #[test]
    fn empty_description_becomes_none() {
        assert_eq!(normalize_description("   ").expect("ok"), None);
        let too_long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_eq!(
            normalize_description(&too_long).expect_err("too long"),
            SendInputError::DescriptionTooLong
        );
    }
}
