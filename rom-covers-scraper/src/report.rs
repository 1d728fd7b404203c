//! Per-item result summary, emitted after both stages complete.

use crate::scanner::RomItem;

/// The `[<PLATFORM>] <name>` prefix shared by every report line.
pub fn item_prefix(item: &RomItem) -> String {
    format!("[{}] {}", item.platform, item.name)
}

/// The outcome half of a report line: `Downloaded!` on success, the error
/// message otherwise. Split out so callers can style it separately.
pub fn outcome_text(item: &RomItem) -> String {
    match &item.error {
        None => "Downloaded!".to_string(),
        Some(e) => e.to_string(),
    }
}

/// The report line for one item: `[<PLATFORM>] <name> - Downloaded!` on
/// success, or the error message in place of `Downloaded!`.
pub fn item_line(item: &RomItem) -> String {
    format!("{} - {}", item_prefix(item), outcome_text(item))
}

/// One line per item, in discovery order.
pub fn format_report(items: &[RomItem]) -> Vec<String> {
    items.iter().map(item_line).collect()
}
