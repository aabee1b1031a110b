use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use common::contract::{PasteInfo, PasteType};
use common::paste::{expiry_status, format_ether, format_timestamp, usd_value};

/// `0.01 ETH (~$31.24)`, omitting the fiat hint when no quote is available
pub fn amount(wei: U256, symbol: &str, eth_usd: Option<f64>) -> String {
    match eth_usd {
        Some(price) => format!(
            "{} {} (~${})",
            format_ether(wei),
            symbol,
            usd_value(wei, price)
        ),
        None => format!("{} {}", format_ether(wei), symbol),
    }
}

/// One line per paste for listings
pub fn summary_line(info: &PasteInfo, symbol: &str, now: DateTime<Utc>) -> String {
    let price = match info.paste_type {
        PasteType::Paid => format!("  {}", amount(info.price, symbol, None)),
        _ => String::new(),
    };
    format!(
        "#{:<6} {:<8} {}  by {}  {}{}",
        info.id.to_string(),
        info.paste_type.to_string(),
        info.title,
        info.creator,
        expiry_status(info.expiration_time, now),
        price
    )
}

/// Metadata block shown above paste content
pub fn header(info: &PasteInfo, symbol: &str, eth_usd: Option<f64>, now: DateTime<Utc>) -> String {
    let mut lines = vec![
        format!("Paste #{}: {}", info.id, info.title),
        format!("  type:     {}", info.paste_type),
        format!("  creator:  {}", info.creator),
        format!("  created:  {}", format_timestamp(info.creation_time)),
        format!("  expiry:   {}", expiry_status(info.expiration_time, now)),
    ];
    if info.paste_type == PasteType::Paid {
        lines.push(format!("  price:    {}", amount(info.price, symbol, eth_usd)));
    }
    if let Some(version) = info.current_version {
        lines.push(format!("  version:  {}", version));
    }
    lines.join("\n")
}
