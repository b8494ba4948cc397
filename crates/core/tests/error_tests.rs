// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finance_tracker_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn serialization() {
        let err = CoreError::Serialization("NaN not allowed".into());
        assert_eq!(err.to_string(), "Serialization error: NaN not allowed");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("unexpected EOF".into());
        assert_eq!(err.to_string(), "Deserialization error: unexpected EOF");
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("permission denied".into());
        assert_eq!(err.to_string(), "File I/O error: permission denied");
    }

    #[test]
    fn invalid_key() {
        let err = CoreError::InvalidKey("key must not be empty".into());
        assert_eq!(err.to_string(), "Invalid storage key: key must not be empty");
    }

    #[test]
    fn backend_unavailable() {
        let err = CoreError::BackendUnavailable("quota exceeded".into());
        assert_eq!(
            err.to_string(),
            "Persistence backend unavailable: quota exceeded"
        );
    }

    #[test]
    fn debug_names_variant() {
        let err = CoreError::InvalidKey("x".into());
        assert!(format!("{err:?}").contains("InvalidKey"));
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("denied")));
    }

    #[test]
    fn from_serde_json_syntax_error() {
        let json_err = serde_json::from_str::<Vec<String>>("[1,").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn from_serde_json_type_error() {
        let json_err = serde_json::from_str::<Vec<String>>("{\"a\": 1}").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io_error() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::FileIO("x".into()));
    }
}
