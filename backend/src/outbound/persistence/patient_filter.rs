//! Translation of [`PatientFilter`] into a boxed SQL predicate over the
//! `owners INNER JOIN pets` source.
//!
//! The same builder feeds both the count and the page query, so the two can
//! never disagree about which rows match.

use diesel::dsl::sql;
use diesel::helper_types::InnerJoinQuerySource;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;

use crate::domain::PatientFilter;

use super::schema::{owners, pets};

/// Query source of every patient read.
pub(crate) type PatientSource = InnerJoinQuerySource<owners::table, pets::table>;

/// Boxed boolean predicate over [`PatientSource`].
pub(crate) type PatientPredicate = Box<dyn BoxableExpression<PatientSource, Pg, SqlType = Bool>>;

/// Escape `LIKE` metacharacters so user text matches literally.
///
/// PostgreSQL uses backslash as the default `LIKE` escape character.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

fn conjoin(acc: Option<PatientPredicate>, next: PatientPredicate) -> Option<PatientPredicate> {
    Some(match acc {
        None => next,
        Some(prev) => Box::new(prev.and(next)),
    })
}

/// Build the predicate for `filter`. An unconstrained filter yields `TRUE`.
pub(crate) fn patient_predicate(filter: &PatientFilter) -> PatientPredicate {
    let mut predicate: Option<PatientPredicate> = None;

    let tokens: Vec<String> = filter
        .pet_type_tokens()
        .into_iter()
        .map(str::to_owned)
        .collect();
    if !tokens.is_empty() {
        predicate = conjoin(predicate, Box::new(pets::pet_type.eq_any(tokens)));
    }
    if let Some(text) = filter.search() {
        let pattern = contains_pattern(text);
        predicate = conjoin(
            predicate,
            Box::new(
                owners::name
                    .ilike(pattern.clone())
                    .or(pets::name.ilike(pattern)),
            ),
        );
    }
    if let Some(text) = filter.owner_name() {
        predicate = conjoin(predicate, Box::new(owners::name.ilike(contains_pattern(text))));
    }
    if let Some(text) = filter.pet_name() {
        predicate = conjoin(predicate, Box::new(pets::name.ilike(contains_pattern(text))));
    }

    predicate.unwrap_or_else(|| Box::new(sql::<Bool>("TRUE")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::debug_query;
    use rstest::rstest;

    fn rendered(filter: &PatientFilter) -> String {
        let query = owners::table
            .inner_join(pets::table)
            .select(owners::id)
            .into_boxed()
            .filter(patient_predicate(filter));
        debug_query::<Pg, _>(&query).to_string()
    }

    #[rstest]
    #[case("rex", "rex")]
    #[case("50%", "50\\%")]
    #[case("a_b", "a\\_b")]
    #[case("c:\\x", "c:\\\\x")]
    fn escapes_like_metacharacters(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }

    #[rstest]
    fn unconstrained_filter_renders_true() {
        let sql = rendered(&PatientFilter::default());
        assert!(sql.contains("INNER JOIN"), "{sql}");
        assert!(sql.contains("WHERE TRUE"), "{sql}");
    }

    #[rstest]
    fn search_covers_owner_and_pet_names() {
        let sql = rendered(&PatientFilter::default().with_search("Rex"));
        assert!(sql.contains(r#""owners"."name" ILIKE"#), "{sql}");
        assert!(sql.contains(r#""pets"."name" ILIKE"#), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
        assert!(sql.contains("%Rex%"), "{sql}");
    }

    #[rstest]
    fn every_active_predicate_is_conjoined() {
        let filter = PatientFilter::default()
            .with_search("a")
            .with_owner_name("b")
            .with_pet_name("c")
            .with_pet_types_csv("dog,fish");
        let sql = rendered(&filter);
        assert_eq!(sql.matches(" AND ").count(), 3, "{sql}");
        assert!(sql.contains(r#""pets"."pet_type" = ANY("#), "{sql}");
        assert!(sql.contains("fish"), "{sql}");
    }
}
