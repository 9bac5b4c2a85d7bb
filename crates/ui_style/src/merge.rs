//! Utility-class composition with conflict resolution.
//!
//! Conflict rules come from `tailwind_fuse`, a port of tailwind-merge: a
//! later utility replaces an earlier one from the same group under the same
//! variants. Exact duplicates of unknown classes keep their last position.

use std::collections::HashSet;

use tailwind_fuse::tw_merge;

/// Joins class fragments, resolving conflicting utilities so later fragments win.
///
/// Fragments may contain several whitespace-separated classes. Empty
/// fragments are skipped.
pub fn cn<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = dedupe_exact(parts);
    if joined.is_empty() {
        return joined;
    }
    tw_merge!(joined.as_str())
}

/// Appends an optional caller class to a base class list.
pub fn with_layout_class(base: &str, layout_class: Option<&str>) -> String {
    cn([base, layout_class.unwrap_or_default()])
}

fn dedupe_exact<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<S> = parts.into_iter().collect();
    let classes: Vec<&str> = parts
        .iter()
        .flat_map(|part| part.as_ref().split_whitespace())
        .collect();

    let mut seen = HashSet::with_capacity(classes.len());
    let mut kept: Vec<&str> = classes
        .iter()
        .rev()
        .filter(|class| seen.insert(**class))
        .copied()
        .collect();
    kept.reverse();
    kept.join(" ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn later_utility_in_the_same_group_wins() {
        assert_eq!(cn(["h-9 px-4 py-2", "h-10 px-8"]), "py-2 h-10 px-8");
        assert_eq!(
            cn(["hover:bg-red-500", "hover:bg-blue-500"]),
            "hover:bg-blue-500"
        );
        assert_eq!(cn(["text-sm text-gray-900", "text-lg"]), "text-gray-900 text-lg");
    }

    #[test]
    fn shorthand_overrides_narrower_forms_only_when_later() {
        assert_eq!(cn(["py-2 px-4", "p-4"]), "p-4");
        assert_eq!(cn(["p-4", "py-2"]), "p-4 py-2");
    }

    #[test]
    fn variants_scope_conflicts() {
        assert_eq!(cn(["hover:bg-gray-100 bg-white"]), "hover:bg-gray-100 bg-white");
    }

    #[test]
    fn duplicates_and_empty_parts_collapse() {
        assert_eq!(cn(["btn custom", "", "   ", "custom"]), "btn custom");
        assert_eq!(cn(["relative flex", "relative"]), "flex relative");
        assert_eq!(
            cn([Some("h-9"), None, Some("w-full")].into_iter().flatten()),
            "h-9 w-full"
        );
        assert_eq!(cn(Vec::<&str>::new()), "");
    }

    #[test]
    fn layout_class_overrides_base() {
        assert_eq!(with_layout_class("inline-flex h-9", Some("h-12")), "inline-flex h-12");
        assert_eq!(with_layout_class("inline-flex", Some("  ")), "inline-flex");
        assert_eq!(with_layout_class("inline-flex", None), "inline-flex");
    }

    const VOCABULARY: &[&str] = &[
        "p-2", "px-4", "py-1", "m-1", "mx-auto", "bg-white", "bg-blue-500", "hover:bg-gray-50",
        "text-sm", "text-lg", "flex", "hidden", "w-full", "h-9", "rounded", "rounded-lg", "card",
    ];

    proptest! {
        #[test]
        fn merging_is_idempotent(picks in proptest::collection::vec(0..VOCABULARY.len(), 0..12)) {
            let parts: Vec<&str> = picks.iter().map(|index| VOCABULARY[*index]).collect();
            let once = cn(&parts);
            prop_assert_eq!(cn([once.as_str()]), once.clone());
            for class in once.split_whitespace() {
                prop_assert!(parts.contains(&class));
            }
        }
    }
}
