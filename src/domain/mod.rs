//! Domain layer: strong types with validation and invariants (no I/O).

mod validation;
mod value;

pub use validation::ValidationError;
pub use value::{ApiId, ApiKey, ApiVariant, MessageId, MessageText, Msisdn, Password, Username};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_id_rejects_empty() {
        assert!(matches!(
            ApiId::new("   "),
            Err(ValidationError::Empty {
                field: ApiId::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty_but_keeps_whitespace() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
        assert_eq!(Password::new(" pw ").unwrap().as_str(), " pw ");
    }

    #[test]
    fn username_and_api_key_are_trimmed() {
        assert_eq!(Username::new("  bob ").unwrap().as_str(), "bob");
        assert_eq!(ApiKey::new("\ttoken\n").unwrap().as_str(), "token");
        assert!(matches!(
            ApiKey::new(""),
            Err(ValidationError::Empty {
                field: ApiKey::FIELD
            })
        ));
    }

    #[test]
    fn message_text_rejects_blank_and_preserves_input() {
        assert!(MessageText::new("   ").is_err());
        assert_eq!(MessageText::new(" hi ").unwrap().as_str(), " hi ");
    }

    #[test]
    fn message_id_and_msisdn_reject_empty() {
        assert!(matches!(
            MessageId::new(""),
            Err(ValidationError::Empty {
                field: MessageId::FIELD
            })
        ));
        assert!(matches!(
            Msisdn::new(" "),
            Err(ValidationError::Empty {
                field: Msisdn::FIELD
            })
        ));
        assert_eq!(Msisdn::new(" 27999123456").unwrap().as_str(), "27999123456");
    }

    #[test]
    fn ids_reject_dot_segments() {
        assert!(matches!(
            MessageId::new(".."),
            Err(ValidationError::DotSegment {
                field: MessageId::FIELD
            })
        ));
        assert!(matches!(
            Msisdn::new(" . "),
            Err(ValidationError::DotSegment {
                field: Msisdn::FIELD
            })
        ));
        assert_eq!(MessageId::new("..abc").unwrap().as_str(), "..abc");
    }

    #[test]
    fn secrets_are_redacted_in_debug_output() {
        let password = Password::new("hunter2").unwrap();
        let key = ApiKey::new("secret-token").unwrap();
        assert!(!format!("{password:?}").contains("hunter2"));
        assert!(!format!("{key:?}").contains("secret-token"));
    }

    #[test]
    fn api_variant_parses_known_names() {
        assert_eq!("http".parse::<ApiVariant>(), Ok(ApiVariant::LegacyQuery));
        assert_eq!(" Legacy ".parse::<ApiVariant>(), Ok(ApiVariant::LegacyQuery));
        assert_eq!("REST".parse::<ApiVariant>(), Ok(ApiVariant::JsonRest));
        assert_eq!("json".parse::<ApiVariant>(), Ok(ApiVariant::JsonRest));
        assert!(matches!(
            "soap".parse::<ApiVariant>(),
            Err(ValidationError::UnknownApiVariant { .. })
        ));
        assert_eq!(ApiVariant::JsonRest.to_string(), "rest");
    }
}
