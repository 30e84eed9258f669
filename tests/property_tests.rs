//! Property-based tests for callback_logger using proptest

use callback_logger::prelude::*;
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use std::cmp::Ordering;

fn severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
        Just(Severity::Fatal),
    ]
}

fn component() -> impl Strategy<Value = ComponentId> {
    (prop_oneof![Just("Net"), Just("Disk"), Just("Ui")], 0u32..4)
        .prop_map(|(name, value)| ComponentId::named(name, value))
}

// ============================================================================
// Filter Tests
// ============================================================================

proptest! {
    /// A populated map delivers iff the component is a key and the severity
    /// reaches that key's threshold
    #[test]
    fn test_component_map_matching(
        thresholds in hash_map(component(), severity(), 1..6),
        candidate in component(),
        level in severity(),
    ) {
        let filter = Filter::ComponentMap(thresholds.clone());
        let expected = thresholds.get(&candidate).is_some_and(|t| level >= *t);
        prop_assert_eq!(filter.matches(level, &candidate), expected);
    }

    /// An empty map delivers everything
    #[test]
    fn test_empty_map_matches_all(candidate in component(), level in severity()) {
        prop_assert!(Filter::all().matches(level, &candidate));
    }

    /// MinSeverity ignores the component
    #[test]
    fn test_min_severity_matching(
        threshold in severity(),
        level in severity(),
        candidate in component(),
    ) {
        let filter = Filter::min_severity(threshold);
        prop_assert_eq!(filter.matches(level, &candidate), level >= threshold);
    }

    /// A component set behaves like a map with a Debug floor
    #[test]
    fn test_component_set_is_debug_floor(
        members in vec(component(), 1..5),
        candidate in component(),
        level in severity(),
    ) {
        let set_filter = Filter::components(members.clone());
        let map_filter = Filter::from_map(members.iter().cloned().map(|c| (c, Severity::Debug)));
        prop_assert_eq!(set_filter.matches(level, &candidate), map_filter.matches(level, &candidate));
        prop_assert_eq!(set_filter.matches(level, &candidate), members.contains(&candidate));
    }
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Test that Severity string conversions roundtrip correctly
    #[test]
    fn test_severity_str_roundtrip(level in severity()) {
        let parsed: Severity = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
        let upper: Severity = level.to_str().to_uppercase().parse().unwrap();
        prop_assert_eq!(level, upper);
    }

    /// Test that Severity ordering follows the numeric rank
    #[test]
    fn test_severity_ordering(a in severity(), b in severity()) {
        prop_assert_eq!(a.cmp(&b), a.rank().cmp(&b.rank()));
        prop_assert!(Severity::Uninitialized < a);
    }

    /// Integer conversion accepts exactly the valid range
    #[test]
    fn test_severity_try_from_i32(raw in -5i32..10) {
        match Severity::try_from(raw) {
            Ok(level) => prop_assert_eq!(i32::from(level.rank()), raw),
            Err(_) => prop_assert!(!(-1..=4).contains(&raw)),
        }
    }
}

// ============================================================================
// Component Tests
// ============================================================================

proptest! {
    /// Equality needs both tag and value to agree
    #[test]
    fn test_component_equality(a in component(), b in component()) {
        let same = a.tag() == b.tag() && a.value() == b.value();
        prop_assert_eq!(a == b, same);
    }

    /// Ordering is by tag, then value
    #[test]
    fn test_component_ordering(a in component(), b in component()) {
        let expected = match a.tag().cmp(b.tag()) {
            Ordering::Equal => a.value().cmp(&b.value()),
            other => other,
        };
        prop_assert_eq!(a.cmp(&b), expected);
    }

    /// Display is always `<taxonomy>#<value>`
    #[test]
    fn test_component_display(a in component()) {
        let rendered = a.to_string();
        let suffix = format!("#{}", a.value());
        prop_assert!(rendered.ends_with(&suffix));
        prop_assert!(rendered.starts_with(a.tag().display_name()));
    }
}

// ============================================================================
// Entry Validation Tests
// ============================================================================

proptest! {
    /// Any non-empty message/file with a positive line is accepted verbatim
    #[test]
    fn test_valid_entries_accepted(
        message in ".{1,64}",
        file in "[a-z_/]{1,16}\\.rs",
        line in 1u32..100_000,
        level in severity(),
    ) {
        let entry = LogEntry::new(
            level,
            ComponentId::named("Prop", 0),
            message.clone(),
            file.clone(),
            line,
        ).unwrap();
        prop_assert_eq!(entry.message, message);
        prop_assert_eq!(entry.file, file);
        prop_assert_eq!(entry.line, line);
    }
}
