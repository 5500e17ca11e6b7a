//! Property-based testing strategies for generating test data
//!
//! Strategies for random but valid type tags, conversions and path
//! expressions, plus the properties they must satisfy.

#![cfg(test)]

use crate::conversion::{Conversion, MatchMode};
use crate::tag::TypeTag;
use crate::value::{Ast, Segment};
use proptest::option;
use proptest::prelude::*;

/// Strategy for tag kinds: non-empty, no angle brackets or colons
pub fn kind_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,11}"
}

/// Strategy for formats: mostly MIME-like, sometimes carrying `<` and `:`
pub fn format_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z]{1,11}/[a-z0-9.+-]{1,16}",
        1 => "[a-z<:]{1,12}",
    ]
}

pub fn type_tag_strategy() -> impl Strategy<Value = TypeTag> {
    (kind_strategy(), option::of(format_strategy()))
        .prop_map(|(kind, format)| TypeTag::of(kind, format.as_deref()))
}

pub fn conversion_strategy() -> impl Strategy<Value = Conversion> {
    (type_tag_strategy(), type_tag_strategy())
        .prop_map(|(source, target)| Conversion::new(source, target))
}

pub fn match_mode_strategy() -> impl Strategy<Value = MatchMode> {
    prop_oneof![
        Just(MatchMode::Exact),
        Just(MatchMode::SourcePartial),
        Just(MatchMode::TargetPartial),
        Just(MatchMode::Partial),
    ]
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_-]{0,8}",
        "[a-z '.\\\\\\]]{0,6}",
    ]
}

pub fn segment_strategy() -> impl Strategy<Value = Segment> {
    prop_oneof![
        name_strategy().prop_map(Segment::Child),
        (-20i64..200).prop_map(Segment::Index),
        (option::of(-10i64..10), option::of(-10i64..10))
            .prop_map(|(start, end)| Segment::Slice { start, end }),
        Just(Segment::Wildcard),
        name_strategy().prop_map(Segment::Descendant),
        Just(Segment::DescendantWildcard),
    ]
}

pub fn ast_strategy() -> impl Strategy<Value = Ast> {
    proptest::collection::vec(segment_strategy(), 0..8).prop_map(Ast::new)
}

mod properties {
    use super::*;

    proptest! {
        #[test]
        fn type_tag_round_trips(tag in type_tag_strategy()) {
            prop_assert_eq!(TypeTag::parse(&tag.to_string()).unwrap(), tag);
        }

        #[test]
        fn conversion_round_trips(conversion in conversion_strategy()) {
            prop_assert_eq!(Conversion::parse(&conversion.to_string()).unwrap(), conversion);
        }

        #[test]
        fn empty_format_round_trips(kind in kind_strategy()) {
            let tag = TypeTag::of(kind, Some(""));
            prop_assert_eq!(TypeTag::parse(&tag.to_string()).unwrap(), tag);
        }

        #[test]
        fn reverse_is_an_involution(conversion in conversion_strategy()) {
            prop_assert_eq!(conversion.reverse().reverse(), conversion);
        }

        #[test]
        fn exact_match_implies_every_mode(
            conversion in conversion_strategy(),
            mode in match_mode_strategy(),
        ) {
            let copy = conversion.clone();
            prop_assert!(conversion.matches(&copy, MatchMode::Exact));
            prop_assert!(conversion.matches(&copy, mode));
        }

        #[test]
        fn partial_ignores_formats(
            conversion in conversion_strategy(),
            source_format in option::of(format_strategy()),
            target_format in option::of(format_strategy()),
        ) {
            let other = Conversion::new(
                TypeTag::of(conversion.source().kind(), source_format.as_deref()),
                TypeTag::of(conversion.target().kind(), target_format.as_deref()),
            );
            prop_assert!(conversion.matches(&other, MatchMode::Partial));
        }

        #[test]
        fn matching_is_symmetric(
            a in conversion_strategy(),
            b in conversion_strategy(),
            mode in match_mode_strategy(),
        ) {
            prop_assert_eq!(a.matches(&b, mode), b.matches(&a, mode));
        }

        #[test]
        fn ast_render_round_trips(ast in ast_strategy()) {
            prop_assert_eq!(Ast::parse(&ast.to_text()).unwrap(), ast);
        }
    }
}
