// Tab snapshot builder - pure transformation, no I/O.
// Turns raw tab handles into exportable URL records.

use crate::bridge::TabHandle;
use crate::modules::envelope::UrlRecord;
use crate::modules::ident::new_id;

/// Build one record per tab, preserving input order.
///
/// A tab with an empty title falls back to its URL; descriptions start
/// empty (the Later app enriches them later); both timestamps are stamped
/// to the same capture instant.
pub fn build_records(tabs: &[TabHandle], category_id: &str) -> Vec<UrlRecord> {
    tabs.iter()
        .map(|tab| {
            let now = chrono::Utc::now().to_rfc3339();
            UrlRecord {
                id: new_id(),
                url: tab.url.clone(),
                title: if tab.title.is_empty() {
                    tab.url.clone()
                } else {
                    tab.title.clone()
                },
                description: String::new(),
                category_id: category_id.to_string(),
                created_at: now.clone(),
                updated_at: now,
            }
        })
        .collect()
}
