//! Ticker normalization for free-text dashboard input.

/// Exchange suffix appended to bare NSE tickers.
pub const EXCHANGE_SUFFIX: &str = ".NS";

/// Qualifies a single ticker piece: trims, uppercases and appends
/// [`EXCHANGE_SUFFIX`] unless already present. Returns `None` for blank input.
pub fn qualify_symbol(piece: &str) -> Option<String> {
    let symbol = piece.trim().to_uppercase();
    if symbol.is_empty() {
        return None;
    }
    if symbol.ends_with(EXCHANGE_SUFFIX) {
        return Some(symbol);
    }
    Some(format!("{symbol}{EXCHANGE_SUFFIX}"))
}

/// Splits comma-separated input into exchange-qualified symbols, preserving
/// order and dropping empty entries. Duplicates are kept.
pub fn normalize_symbols(input: &str) -> Vec<String> {
    input.split(',').filter_map(qualify_symbol).collect()
}
