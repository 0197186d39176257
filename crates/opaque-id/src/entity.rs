//! Integration glue between the codec and persisted entities.

use crate::codec::OpaqueIdCodec;

/// An entity exposing a primary key and, optionally, a stored opaque id.
///
/// Implemented by any persisted type whose rows are addressed externally by
/// opaque identifier. `stored_opaque_id` returns whatever the storage layer
/// currently holds; it is `None` (or empty) until the identifier has been
/// materialized.
pub trait OpaqueKeyed {
    fn primary_key(&self) -> u64;
    fn stored_opaque_id(&self) -> Option<&str>;
}

impl OpaqueIdCodec {
    /// The opaque identifier of an entity.
    ///
    /// Prefers the persisted value; falls back to encoding the primary key
    /// on the fly for rows whose identifier has not been materialized yet.
    /// Pure read: nothing is persisted here.
    pub fn opaque_id_of<E: OpaqueKeyed>(&self, entity: &E) -> String {
        match entity.stored_opaque_id() {
            Some(stored) if !stored.is_empty() => stored.to_string(),
            _ => self.encode(entity.primary_key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OpaqueIdConfig;

    struct Row {
        id: u64,
        opaque_id: Option<String>,
    }

    impl OpaqueKeyed for Row {
        fn primary_key(&self) -> u64 {
            self.id
        }

        fn stored_opaque_id(&self) -> Option<&str> {
            self.opaque_id.as_deref()
        }
    }

    fn codec() -> OpaqueIdCodec {
        OpaqueIdCodec::new(&OpaqueIdConfig::new("this is my salt", 8)).unwrap()
    }

    #[test]
    fn stored_value_wins_over_recomputation() {
        let row = Row {
            id: 7,
            opaque_id: Some("already-stored".to_string()),
        };
        assert_eq!(codec().opaque_id_of(&row), "already-stored");
    }

    #[test]
    fn missing_value_is_computed_from_the_primary_key() {
        let codec = codec();
        let row = Row {
            id: 7,
            opaque_id: None,
        };
        assert_eq!(codec.opaque_id_of(&row), codec.encode(7));
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let codec = codec();
        let row = Row {
            id: 7,
            opaque_id: Some(String::new()),
        };
        assert_eq!(codec.opaque_id_of(&row), codec.encode(7));
    }
}
