//! Glob semantics of the ignore-rule matcher.

use snapdiff_core::{DiffError, IgnoreSet};

fn set(patterns: &[&str]) -> IgnoreSet {
    IgnoreSet::new(patterns).expect("test patterns must compile")
}

// ============================================================================
// 1. Wildcard semantics
// ============================================================================

#[test]
fn literal_patterns_match_exactly() {
    let rules = set(&["/a/b"]);
    assert!(rules.is_ignored("/a/b"));
    assert!(!rules.is_ignored("/a"));
    assert!(!rules.is_ignored("/a/b/c"));
    assert!(!rules.is_ignored("/a/bb"));
}

#[test]
fn star_matches_any_run_including_slashes() {
    let rules = set(&["/meta/*"]);
    assert!(rules.is_ignored("/meta/x"));
    assert!(rules.is_ignored("/meta/x/y/z"));
    assert!(!rules.is_ignored("/meta"));
    assert!(!rules.is_ignored("/other/x"));
}

#[test]
fn star_in_the_middle() {
    let rules = set(&["/a/*/timestamp"]);
    assert!(rules.is_ignored("/a/x/timestamp"));
    assert!(rules.is_ignored("/a/x/y/timestamp"));
    assert!(!rules.is_ignored("/a/x/timestamps"));
}

#[test]
fn leading_star_matches_any_prefix() {
    let rules = set(&["*/timestamp"]);
    assert!(rules.is_ignored("/timestamp"));
    assert!(rules.is_ignored("/a/b/timestamp"));
    assert!(!rules.is_ignored("/timestamp/extra"));
}

#[test]
fn question_mark_matches_exactly_one_character() {
    let rules = set(&["/item?"]);
    assert!(rules.is_ignored("/item1"));
    assert!(rules.is_ignored("/items"));
    assert!(!rules.is_ignored("/item"));
    assert!(!rules.is_ignored("/item10"));
}

#[test]
fn matching_is_case_sensitive() {
    let rules = set(&["/Config"]);
    assert!(rules.is_ignored("/Config"));
    assert!(!rules.is_ignored("/config"));
}

// ============================================================================
// 2. Character classes
// ============================================================================

#[test]
fn character_class_with_range() {
    let rules = set(&["/a/[0-9]"]);
    assert!(rules.is_ignored("/a/0"));
    assert!(rules.is_ignored("/a/7"));
    assert!(!rules.is_ignored("/a/x"));
    assert!(!rules.is_ignored("/a/10"));
}

#[test]
fn character_class_with_members() {
    let rules = set(&["/[abc]"]);
    assert!(rules.is_ignored("/a"));
    assert!(rules.is_ignored("/c"));
    assert!(!rules.is_ignored("/d"));
}

#[test]
fn negated_character_class() {
    let rules = set(&["/[!0-9]"]);
    assert!(rules.is_ignored("/x"));
    assert!(!rules.is_ignored("/5"));
}

#[test]
fn closing_bracket_as_first_member_is_literal() {
    let rules = set(&["/[]]"]);
    assert!(rules.is_ignored("/]"));
    assert!(!rules.is_ignored("/x"));
}

#[test]
fn trailing_dash_in_class_is_literal() {
    let rules = set(&["/[a-]"]);
    assert!(rules.is_ignored("/a"));
    assert!(rules.is_ignored("/-"));
    assert!(!rules.is_ignored("/b"));
}

// ============================================================================
// 3. Construction and validation
// ============================================================================

#[test]
fn empty_set_ignores_nothing() {
    let rules = IgnoreSet::empty();
    assert!(!rules.is_ignored("/"));
    assert!(!rules.is_ignored("/anything"));
}

#[test]
fn unterminated_class_is_rejected_at_construction() {
    let err = IgnoreSet::new(["/a/[0-9"]).unwrap_err();
    match err {
        DiffError::Pattern { pattern, message } => {
            assert_eq!(pattern, "/a/[0-9");
            assert!(message.contains("unterminated"));
        }
        other => panic!("expected Pattern error, got {other:?}"),
    }
}

#[test]
fn pattern_that_never_matches_is_permitted() {
    let rules = set(&["/no/such/path/anywhere"]);
    assert!(!rules.is_ignored("/a"));
}

#[test]
fn any_rule_in_the_set_suffices() {
    let rules = set(&["/a", "/b", "/c/*"]);
    assert!(rules.is_ignored("/b"));
    assert!(rules.is_ignored("/c/deep/path"));
    assert!(!rules.is_ignored("/d"));
}

#[test]
fn patterns_are_reported_in_supplied_order() {
    let rules = set(&["/b", "/a"]);
    let patterns: Vec<&str> = rules.patterns().collect();
    assert_eq!(patterns, ["/b", "/a"]);
}

#[test]
fn consecutive_stars_collapse() {
    let rules = set(&["/a/**"]);
    assert!(rules.is_ignored("/a/b/c"));
    assert!(!rules.is_ignored("/a"));
}
