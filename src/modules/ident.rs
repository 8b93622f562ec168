// Identifier generation for records and categories.

use uuid::Uuid;

/// Collision-resistant identifier for new records.
/// No coordination, no persistence; uniqueness is statistical only.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
