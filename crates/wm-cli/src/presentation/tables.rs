//! Table formatting utilities for CLI output.

use wm_core::Contract;

/// Width of the contracts table, for separators.
pub const CONTRACT_TABLE_WIDTH: usize = 64;

/// Truncates a string to a maximum length, adding "..." if needed.
///
/// ```rust
/// use wm_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("7-crypto-delta", 20), "7-crypto-delta");
/// assert_eq!(truncate_string("12-nebula-crypto", 10), "12-nebu...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Status column text for a contract.
pub const fn realization_label(is_realized: bool) -> &'static str {
    if is_realized { "Realized" } else { "Pending" }
}

pub fn contract_header() -> String {
    format!(
        "{:<10} {:<22} {:<9} {:>10}  {}",
        "Time", "Code", "Network", "Price", "Status"
    )
}

pub fn contract_row(contract: &Contract) -> String {
    format!(
        "{:<10} {:<22} {:<9} {:>10}  {}",
        contract.clock_time(),
        truncate_string(&contract.transfer_code, 22),
        truncate_string(&contract.network_status, 9),
        format!("{} UNIT", contract.price),
        realization_label(contract.is_realized)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_truncate_string_no_truncation_needed() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_contract_row() {
        let now = Local.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap();
        let mut contract = Contract::new(2_097_152, "7-crypto-delta", now);
        let row = contract_row(&contract);
        assert!(row.starts_with("09:30:00"));
        assert!(row.contains("7-crypto-delta"));
        assert!(row.contains("12 UNIT"));
        assert!(row.ends_with("Pending"));

        contract.is_realized = true;
        assert!(contract_row(&contract).ends_with("Realized"));
    }
}
