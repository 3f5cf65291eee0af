//! Filter stage: reduce a collection to the records matching every criterion

use super::descriptor::{Filter, QueryDescriptor};
use super::record::{FieldValue, Record};

impl Filter {
    /// Check a single record against this criterion.
    ///
    /// A record without the field, or with a value of the wrong kind, never
    /// matches.
    pub fn matches<R: Record>(&self, record: &R) -> bool {
        let value = record.field(self.field());

        match (self, value) {
            (
                Self::Equals {
                    value: expected,
                    case_sensitive,
                    ..
                },
                Some(FieldValue::Text(actual)),
            ) => {
                if *case_sensitive {
                    actual == expected
                } else {
                    actual.to_lowercase() == expected.to_lowercase()
                }
            }
            (Self::Contains { needle, .. }, Some(FieldValue::Text(actual))) => {
                actual.to_lowercase().contains(&needle.to_lowercase())
            }
            (Self::Contains { needle, .. }, Some(FieldValue::Tags(tags))) => {
                let needle = needle.to_lowercase();
                tags.iter().any(|t| t.to_lowercase().contains(&needle))
            }
            (Self::Range { min, max, .. }, Some(FieldValue::Number(n))) => {
                min.map_or(true, |min| min <= n) && max.map_or(true, |max| n <= max)
            }
            (Self::Flag { value: expected, .. }, Some(FieldValue::Flag(actual))) => {
                actual == *expected
            }
            _ => false,
        }
    }
}

/// Case-insensitive free-text match against headline, description and tags.
///
/// `needle` must already be lowercased.
pub fn matches_search<R: Record>(record: &R, needle: &str) -> bool {
    record.headline().to_lowercase().contains(needle)
        || record.description().to_lowercase().contains(needle)
        || record
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Keep the records that satisfy the search and all filters, in input order
pub fn apply<'a, R: Record>(records: &'a [R], descriptor: &QueryDescriptor) -> Vec<&'a R> {
    let needle = descriptor.search_needle();

    records
        .iter()
        .filter(|r| needle.as_deref().map_or(true, |n| matches_search(*r, n)))
        .filter(|r| descriptor.filters.iter().all(|f| f.matches(*r)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::Item;

    fn items() -> Vec<Item> {
        vec![
            Item::new("1", "Ceramic Bowl")
                .with_description("Hand-thrown stoneware")
                .with_tags(&["kitchen"])
                .with_price(40.0)
                .with_category("Pottery")
                .with_flag(true),
            Item::new("2", "Wood Table")
                .with_description("Solid oak")
                .with_tags(&["Furniture", "Oak"])
                .with_price(60.0)
                .with_category("Woodwork")
                .with_flag(false),
            Item::new("3", "Glass Vase")
                .with_description("A vase shaped like a bowl")
                .with_price(90.0)
                .with_category("Glasswork"),
            Item::new("4", "Wool Blanket")
                .with_description("Warm")
                .with_price(120.0)
                .with_category("Textiles"),
        ]
    }

    fn ids(records: &[&Item]) -> Vec<String> {
        records.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_search_title_description_and_tags() {
        let items = items();
        let d = QueryDescriptor::new().with_search("BOWL");
        assert_eq!(ids(&apply(&items, &d)), vec!["1", "3"]);

        let d = QueryDescriptor::new().with_search("furn");
        assert_eq!(ids(&apply(&items, &d)), vec!["2"]);
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let items = items();
        let d = QueryDescriptor::new().with_search("");
        assert_eq!(apply(&items, &d).len(), 4);
    }

    #[test]
    fn test_price_range() {
        let items = items();
        let d = QueryDescriptor::new().with_filter(Filter::range("price", Some(50.0), Some(100.0)));
        assert_eq!(ids(&apply(&items, &d)), vec!["2", "3"]);
    }

    #[test]
    fn test_missing_numeric_field_fails_range() {
        let items = vec![Item::new("1", "No price")];
        let d = QueryDescriptor::new().with_filter(Filter::range("price", None, None));
        assert!(apply(&items, &d).is_empty());
    }

    #[test]
    fn test_exact_match_case() {
        let items = items();
        let d = QueryDescriptor::new().with_filter(Filter::equals("category", "pottery"));
        assert_eq!(ids(&apply(&items, &d)), vec!["1"]);

        let d = QueryDescriptor::new().with_filter(Filter::id_equals("category", "pottery"));
        assert!(apply(&items, &d).is_empty());
    }

    #[test]
    fn test_flag_only_matches_present_value() {
        let items = items();
        let d = QueryDescriptor::new().with_filter(Filter::flag("flag", false));
        assert_eq!(ids(&apply(&items, &d)), vec!["2"]);
    }

    #[test]
    fn test_filters_are_conjunctive_and_order_independent() {
        let items = items();
        let a = QueryDescriptor::new()
            .with_filter(Filter::range("price", Some(30.0), None))
            .with_filter(Filter::contains("category", "o"));
        let b = QueryDescriptor::new()
            .with_filter(Filter::contains("category", "o"))
            .with_filter(Filter::range("price", Some(30.0), None));
        assert_eq!(ids(&apply(&items, &a)), ids(&apply(&items, &b)));
        assert_eq!(ids(&apply(&items, &a)), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_adding_filters_never_grows_result() {
        let items = items();
        let mut d = QueryDescriptor::new();
        let mut previous = apply(&items, &d).len();
        for filter in [
            Filter::range("price", Some(45.0), None),
            Filter::contains("category", "w"),
            Filter::flag("flag", false),
        ] {
            d = d.with_filter(filter);
            let current = apply(&items, &d).len();
            assert!(current <= previous);
            previous = current;
        }
    }
}
