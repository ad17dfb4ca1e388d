//! Unit tests for provider codes
//!
//! Tests cover normalisation, rejection of malformed input,
//! ordering, and serde round-trips through JSON strings.

use core_kernel::{CodeError, ProviderCode};

mod construction {
    use super::*;

    #[test]
    fn test_new_normalises_case_and_whitespace() {
        let code = ProviderCode::new("  Generali ").unwrap();
        assert_eq!(code.as_str(), "generali");
    }

    #[test]
    fn test_equal_after_normalisation() {
        assert_eq!(
            ProviderCode::new("AXA").unwrap(),
            "axa".parse::<ProviderCode>().unwrap()
        );
    }

    #[test]
    fn test_empty_code_rejected() {
        assert_eq!(ProviderCode::new("   "), Err(CodeError::Empty));
    }

    #[test]
    fn test_path_characters_rejected() {
        let result = ProviderCode::new("../etc/passwd");
        assert!(matches!(result, Err(CodeError::InvalidCharacters(_))));
    }

    #[test]
    fn test_underscore_and_dash_allowed() {
        assert!(ProviderCode::new("unipol_sai-2").is_ok());
    }
}

mod ordering {
    use super::*;

    #[test]
    fn test_codes_sort_alphabetically() {
        let mut codes = vec![
            ProviderCode::new("unipolsai").unwrap(),
            ProviderCode::new("allianz").unwrap(),
            ProviderCode::new("generali").unwrap(),
        ];
        codes.sort();

        let names: Vec<&str> = codes.iter().map(ProviderCode::as_str).collect();
        assert_eq!(names, vec!["allianz", "generali", "unipolsai"]);
    }
}

mod serde_support {
    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let code = ProviderCode::new("allianz").unwrap();
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"allianz\"");
    }

    #[test]
    fn test_deserialize_normalises() {
        let code: ProviderCode = serde_json::from_str("\"UnipolSai\"").unwrap();
        assert_eq!(code.to_string(), "unipolsai");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<ProviderCode, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
