//! Property-based tests for scopelog using proptest

use proptest::prelude::*;
use scopelog::prelude::*;
use scopelog::{level_name, parse_level, LevelFilter, INVALID_LEVEL};
use serde_json::Value;
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Error),
    ]
}

/// Flip the case of each character according to `mask`
fn mix_case(name: &str, mask: &[bool]) -> String {
    name.chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn json_logger(buffer: &SharedBuffer) -> Logger {
    Logger::builder()
        .min_level(LogLevel::Debug)
        .writer(Arc::new(JsonWriter::new(buffer.clone())))
        .build()
}

// ============================================================================
// Level registry
// ============================================================================

proptest! {
    /// Any case variant of a level name parses to the same code
    #[test]
    fn test_level_name_case_insensitive(
        level in any_level(),
        mask in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let variant = mix_case(level.to_str(), &mask);
        prop_assert_eq!(parse_level(&variant), level.code());
        prop_assert_eq!(variant.parse::<LogLevel>().unwrap(), level);
    }

    /// Names outside the registry are invalid
    #[test]
    fn test_unknown_names_are_invalid(name in "[a-z]{0,12}") {
        prop_assume!(!["debug", "info", "error"].contains(&name.as_str()));
        prop_assert_eq!(parse_level(&name), INVALID_LEVEL);
        prop_assert!(LogLevel::parse(&name).is_none());
    }

    /// Codes outside {0, 1, 2} are unknown and never emitted
    #[test]
    fn test_unknown_codes(code in any::<i32>()) {
        prop_assume!(!(0..=2).contains(&code));
        let filter = LevelFilter::new(LogLevel::Debug);

        prop_assert_eq!(level_name(code), "UNKNOWN");
        prop_assert!(!filter.should_emit(code));
        prop_assert!(!filter.set_minimum(code));
        prop_assert_eq!(filter.minimum(), LogLevel::Debug);
    }

    /// A record is emitted exactly when its level reaches the minimum
    #[test]
    fn test_filter_matches_ordering(minimum in any_level(), level in any_level()) {
        let filter = LevelFilter::new(minimum);
        prop_assert_eq!(filter.should_emit(level.code()), level >= minimum);
        prop_assert_eq!(level_name(level.code()), level.to_str());
    }
}

// ============================================================================
// JSON writer
// ============================================================================

proptest! {
    /// Primitive fields and the message survive a JSON round trip
    #[test]
    fn test_json_primitive_fields_round_trip(
        message in "\\PC{0,40}",
        text in "\\PC{0,20}",
        int in any::<i64>(),
        flag in any::<bool>(),
        quarters in -1_000_000i32..1_000_000,
    ) {
        let float = f64::from(quarters) / 4.0;
        let buffer = SharedBuffer::new();
        let logger = json_logger(&buffer);

        logger
            .with("text", text.as_str())
            .with("int", int)
            .with("flag", flag)
            .with("float", float)
            .info(message.as_str());
        logger.flush().unwrap();

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        let entry: Value = serde_json::from_str(&lines[0]).unwrap();

        prop_assert_eq!(entry["msg"].as_str(), Some(message.as_str()));
        prop_assert_eq!(entry["text"].as_str(), Some(text.as_str()));
        prop_assert_eq!(entry["int"].as_i64(), Some(int));
        prop_assert_eq!(entry["flag"].as_bool(), Some(flag));
        prop_assert_eq!(entry["float"].as_f64(), Some(float));
    }

    /// The text writer always produces exactly one line per record, and
    /// quoted values never close early
    #[test]
    fn test_text_record_is_single_line(
        message in "[^\"\\\\\\p{C}]{0,30}[\\n\\r\\t]{1,3}[^\"\\\\\\p{C}]{0,30}",
        key in "[a-z \"=\\n]{1,10}",
        value in "\\PC{0,20}[\"\\\\\\n\\r\\t]{1,3}\\PC{0,20}",
    ) {
        let buffer = SharedBuffer::new();
        let logger = Logger::with_writer(Arc::new(TextWriter::new(buffer.clone())));

        logger.with(key.as_str(), value.as_str()).info(message.as_str());
        logger.flush().unwrap();

        let lines = buffer.lines();
        prop_assert_eq!(lines.len(), 1);
        // Drop escaped backslashes, then every remaining `\"` is an escaped quote
        let stripped = lines[0].replace("\\\\", "");
        let unescaped_quotes = stripped.matches('"').count() - stripped.matches("\\\"").count();
        prop_assert_eq!(unescaped_quotes, 2);
    }
}
