// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::User;

/// Case-insensitive substring match of `search` against `name`.
pub fn matches_name(name: &str, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&search.to_lowercase())
}

/// Narrows `available` to the users whose name contains `search`. An empty
/// search hands the list back untouched.
pub fn filter_candidates<'a>(available: Vec<&'a User>, search: &str) -> Vec<&'a User> {
    if search.is_empty() {
        return available;
    }
    available
        .into_iter()
        .filter(|user| matches_name(&user.name, search))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{filter_candidates, matches_name};
    use crate::User;
    use proptest::prelude::*;

    fn users() -> Vec<User> {
        vec![
            User::new(5, "Ken Alvarez", ""),
            User::new(6, "Calvin Jones", ""),
            User::new(7, "Bradley Wells", ""),
            User::new(8, "Brad Grant", ""),
        ]
    }

    fn names<'a>(users: &[&'a User]) -> Vec<&'a str> {
        users.iter().map(|user| user.name.as_str()).collect()
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let users = users();
        let refs = users.iter().collect::<Vec<_>>();
        assert_eq!(filter_candidates(refs.clone(), ""), refs);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let users = users();
        let refs = users.iter().collect::<Vec<_>>();

        assert_eq!(
            names(&filter_candidates(refs.clone(), "BRAD")),
            vec!["Bradley Wells", "Brad Grant"]
        );
        assert_eq!(
            names(&filter_candidates(refs.clone(), "alv")),
            vec!["Ken Alvarez", "Calvin Jones"]
        );
        assert!(filter_candidates(refs, "zed").is_empty());
    }

    #[test]
    fn whitespace_is_matched_literally() {
        let users = users();
        let refs = users.iter().collect::<Vec<_>>();
        assert_eq!(names(&filter_candidates(refs.clone(), "n j")), vec!["Calvin Jones"]);
        assert!(filter_candidates(refs, "  ").is_empty());
    }

    #[test]
    fn matches_name_handles_unicode_case() {
        assert!(matches_name("Zoë Ødegaard", "ØDE"));
        assert!(matches_name("anything", ""));
        assert!(!matches_name("Brad", "Bradley"));
    }

    proptest! {
        #[test]
        fn results_match_and_narrow(search in "[a-zA-Z ]{0,4}", extra in "[a-z]{1,2}") {
            let users = users();
            let refs = users.iter().collect::<Vec<_>>();

            let wide = filter_candidates(refs.clone(), &search);
            for user in &wide {
                prop_assert!(matches_name(&user.name, &search));
            }

            let narrower = format!("{search}{extra}");
            let narrow = filter_candidates(refs, &narrower);
            for user in &narrow {
                prop_assert!(wide.iter().any(|candidate| candidate.id == user.id));
            }
        }
    }
}
