// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryBackend, FileBackend, codec helpers
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;
use finance_tracker_core::models::category::Category;
use finance_tracker_core::storage::backend::{MemoryBackend, PersistenceBackend};
use finance_tracker_core::storage::codec;
use finance_tracker_core::storage::file::{validate_key, FileBackend};

/// Backend whose every call fails, like browser storage that is disabled
/// or over quota.
struct BrokenBackend;

impl PersistenceBackend for BrokenBackend {
    fn load(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::BackendUnavailable("storage disabled".into()))
    }

    fn save(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::BackendUnavailable("quota exceeded".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryBackend
// ═══════════════════════════════════════════════════════════════════

mod memory_backend {
    use super::*;

    #[test]
    fn absent_key_loads_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.load("missing").unwrap(), None);
        assert!(backend.is_empty());
    }

    #[test]
    fn save_then_load() {
        let backend = MemoryBackend::new();
        backend.save("k", "[1,2]").unwrap();
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn save_overwrites() {
        let backend = MemoryBackend::new();
        backend.save("k", "old").unwrap();
        backend.save("k", "new").unwrap();
        assert_eq!(backend.get("k").as_deref(), Some("new"));
        assert_eq!(backend.len(), 1);
    }

    #[test]
    fn clones_share_entries() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        backend.save("k", "v").unwrap();
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn with_entries_seeds_values() {
        let backend = MemoryBackend::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(backend.len(), 2);
        assert_eq!(backend.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn usable_as_boxed_trait_object() {
        let boxed: Box<dyn PersistenceBackend> = Box::new(MemoryBackend::new());
        boxed.save("k", "v").unwrap();
        assert_eq!(boxed.load("k").unwrap().as_deref(), Some("v"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileBackend
// ═══════════════════════════════════════════════════════════════════

mod file_backend {
    use super::*;

    #[test]
    fn open_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("store");
        let backend = FileBackend::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.dir(), root.as_path());
    }

    #[test]
    fn absent_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.load("finance-wallets").unwrap(), None);
    }

    #[test]
    fn save_writes_json_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.save("finance-wallets", "[]").unwrap();

        let path = dir.path().join("finance-wallets.json");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
        assert_eq!(backend.load("finance-wallets").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        backend.save("k", "1").unwrap();
        backend.save("k", "2").unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["k.json".to_string()]);
        assert_eq!(backend.load("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(matches!(
            backend.save("../escape", "x"),
            Err(CoreError::InvalidKey(_))
        ));
        assert!(matches!(backend.load("a/b"), Err(CoreError::InvalidKey(_))));
    }

    #[test]
    fn path_for_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        let path = backend.path_for("finance-categories").unwrap();
        assert_eq!(path, dir.path().join("finance-categories.json"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Key validation
// ═══════════════════════════════════════════════════════════════════

mod keys {
    use super::*;

    #[test]
    fn accepts_default_keys() {
        assert!(validate_key("finance-wallets").is_ok());
        assert!(validate_key("finance_transactions.v2").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(validate_key(""), Err(CoreError::InvalidKey(_))));
    }

    #[test]
    fn rejects_leading_dot() {
        assert!(matches!(validate_key(".hidden"), Err(CoreError::InvalidKey(_))));
    }

    #[test]
    fn rejects_separators_and_spaces() {
        for key in ["a/b", "a\\b", "a b", "ключ"] {
            assert!(validate_key(key).is_err(), "{key} should be rejected");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Codec
// ═══════════════════════════════════════════════════════════════════

mod codec_helpers {
    use super::*;

    #[test]
    fn encode_decode_categories() {
        let categories = vec![Category::new("rent", "Rent", "home")];
        let raw = codec::encode(&categories).unwrap();
        let back: Vec<Category> = codec::decode(&raw).unwrap();
        assert_eq!(back, categories);
    }

    #[test]
    fn decode_garbage_is_deserialization_error() {
        let result: Result<Vec<Category>, _> = codec::decode("{not json");
        assert!(matches!(result, Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn encode_non_string_keys_is_serialization_error() {
        // JSON object keys must be strings.
        let mut map = std::collections::BTreeMap::new();
        map.insert(vec![1u8], 1);
        assert!(matches!(codec::encode(&map), Err(CoreError::Serialization(_))));
    }

    #[test]
    fn load_without_backend_is_none() {
        let loaded: Option<Vec<Category>> = codec::load(None, "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_absent_key_is_none() {
        let backend = MemoryBackend::new();
        let loaded: Option<Vec<Category>> = codec::load(Some(&backend), "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_corrupt_value_is_none() {
        let backend = MemoryBackend::with_entries([("k", "][")]);
        let loaded: Option<Vec<Category>> = codec::load(Some(&backend), "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_wrong_shape_is_none() {
        let backend = MemoryBackend::with_entries([("k", r#"{"id":"x"}"#)]);
        let loaded: Option<Vec<Category>> = codec::load(Some(&backend), "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_failing_backend_is_none() {
        let loaded: Option<Vec<Category>> = codec::load(Some(&BrokenBackend), "k");
        assert!(loaded.is_none());
    }

    #[test]
    fn load_or_uses_fallback() {
        let backend = MemoryBackend::with_entries([("k", "nope")]);
        let loaded: Vec<String> = codec::load_or(Some(&backend), "k", || vec!["default".into()]);
        assert_eq!(loaded, vec!["default".to_string()]);
    }

    #[test]
    fn load_or_prefers_stored_value() {
        let backend = MemoryBackend::with_entries([("k", r#"["a","b"]"#)]);
        let loaded: Vec<String> = codec::load_or(Some(&backend), "k", Vec::new);
        assert_eq!(loaded, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn write_back_stores_json() {
        let backend = MemoryBackend::new();
        assert!(codec::write_back(Some(&backend), "k", &vec![1, 2, 3]));
        assert_eq!(backend.get("k").as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn write_back_without_backend_reports_false() {
        assert!(!codec::write_back(None, "k", &vec![1]));
    }

    #[test]
    fn write_back_swallows_backend_failure() {
        assert!(!codec::write_back(Some(&BrokenBackend), "k", &vec![1]));
    }
}
