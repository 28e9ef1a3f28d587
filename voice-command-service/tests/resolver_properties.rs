use proptest::prelude::*;
use std::sync::Arc;
use voice_command_service::{
    default_alias_entries, default_routes, similarity, AliasTable, CommandResolver, MatchKind,
};

fn resolver() -> CommandResolver {
    let table = AliasTable::from_entries(&default_alias_entries(), &default_routes()).unwrap();
    CommandResolver::new(Arc::new(table))
}

proptest! {
    #[test]
    fn resolution_is_idempotent(utterance in "[a-z ]{0,30}") {
        let resolver = resolver();
        prop_assert_eq!(resolver.resolve(&utterance), resolver.resolve(&utterance));
    }

    #[test]
    fn whitespace_never_resolves(utterance in "[ \t\n\r]{0,12}") {
        prop_assert!(resolver().resolve(&utterance).is_none());
    }

    #[test]
    fn contained_alias_beats_fuzzy(prefix in "[a-z]{0,8}", suffix in "[a-z]{0,8}", pick in 0usize..48) {
        let resolver = resolver();
        let (_, alias) = resolver.table().iter().nth(pick).unwrap();
        let utterance = format!("{prefix} {alias} {suffix}");

        let resolution = resolver.resolve(&utterance).unwrap();
        let matched = resolution.matched.unwrap();

        prop_assert_eq!(matched.kind, MatchKind::Exact);
        prop_assert!(utterance.contains(&matched.alias));
        prop_assert!(matched.alias.chars().count() >= alias.chars().count());
    }

    #[test]
    fn fuzzy_scores_reach_threshold(utterance in "[a-z ]{1,20}") {
        let resolver = resolver();
        if let Some(resolution) = resolver.resolve(&utterance) {
            if let Some(MatchKind::Fuzzy { score }) = resolution.matched.map(|m| m.kind) {
                prop_assert!(score >= resolver.threshold());
            }
        }
    }

    #[test]
    fn similarity_is_bounded_and_symmetric(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let forward = similarity(&a, &b);
        prop_assert!((0.0..=1.0).contains(&forward));
        prop_assert!((forward - similarity(&b, &a)).abs() < 1e-12);
    }
}
