//! Utility functions for SQLite storage operations.

use uuid::Uuid;

/// Length of the random part of a generated record ID.
const ID_SUFFIX_LEN: usize = 12;

/// Generates a record ID of the form `<prefix>_<12 hex chars>`, e.g.
/// `acc_9f2c41d07a3e`. The random part is the head of a v4 UUID.
pub fn prefixed_id(prefix: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &random[..ID_SUFFIX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_id_shape() {
        let id = prefixed_id("acc");
        assert_eq!(id.len(), 4 + ID_SUFFIX_LEN);
        assert!(id.starts_with("acc_"));
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_prefixed_id_is_unique() {
        let first = prefixed_id("txn");
        let second = prefixed_id("txn");
        assert_ne!(first, second);
    }
}
