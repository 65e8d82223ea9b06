use core_search::SearchEngine;
use proptest::prelude::*;

proptest! {
    // Every reported hit covers text equal to the query (ignoring case).
    #[test]
    fn hits_cover_the_query(doc in prop::collection::vec("[abAB ]{0,16}", 1..5), query in "[ab]{1,3}") {
        let mut e = SearchEngine::new();
        e.set_query(query.clone());
        e.search(&doc);
        for r in e.results() {
            let text: String = doc[r.line].chars().skip(r.col).take(r.len).collect();
            prop_assert_eq!(text.to_lowercase(), query.to_lowercase());
        }
    }

    // Literal and escaped-regex searches agree on positions.
    #[test]
    fn regex_of_literal_matches_literal(doc in prop::collection::vec("[xyz.]{0,12}", 1..4), query in "[xyz.]{1,3}") {
        let mut literal = SearchEngine::new();
        literal.set_query(query.clone());
        literal.search(&doc);

        let mut re = SearchEngine::new();
        re.set_regex(true);
        re.set_query(regex::escape(&query));
        re.search(&doc);

        prop_assert_eq!(literal.results(), re.results());
    }
}
