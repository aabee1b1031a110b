use alloy_primitives::{utils, U256};

use super::PasteError;

/// Parse a decimal ETH amount into wei with exact 18-decimal fixed point
///
/// Rejects negative values, more than 18 fractional digits and anything
/// that is not a plain decimal number.
pub fn parse_ether(amount: &str) -> Result<U256, PasteError> {
    let trimmed = amount.trim();
    let invalid = || PasteError::InvalidAmount(amount.to_string());

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty())
        || !digits(whole)
        || !digits(fraction)
        || fraction.len() > 18
    {
        return Err(invalid());
    }

    utils::parse_ether(trimmed).map_err(|_| invalid())
}

/// Format wei as a decimal ETH string without trailing zeros
pub fn format_ether(wei: U256) -> String {
    let formatted = utils::format_ether(wei);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => formatted,
    }
}

/// Approximate fiat value of `wei` at `eth_usd`, to two decimals
pub fn usd_value(wei: U256, eth_usd: f64) -> String {
    let eth: f64 = format_ether(wei).parse().unwrap_or(0.0);
    format!("{:.2}", eth * eth_usd)
}
