//! Filter/sort engine for the entity list.
//!
//! Type filter, then text filter, then a stable sort. Pure; never mutates the input.

use crate::domain::{Entity, EntityKind};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Group,
    Supergroup,
    Channel,
}

impl TypeFilter {
    pub const ALL: [TypeFilter; 4] = [
        TypeFilter::All,
        TypeFilter::Group,
        TypeFilter::Supergroup,
        TypeFilter::Channel,
    ];

    pub fn matches(self, kind: EntityKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Group => kind == EntityKind::Group,
            TypeFilter::Supergroup => kind == EntityKind::Supergroup,
            TypeFilter::Channel => kind == EntityKind::Channel,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::All => "All Types",
            TypeFilter::Group => "Groups Only",
            TypeFilter::Supergroup => "Supergroups Only",
            TypeFilter::Channel => "Channels Only",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    IdAsc,
    IdDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::IdAsc,
        SortKey::IdDesc,
    ];

    fn compare(self, a: &Entity, b: &Entity) -> Ordering {
        match self {
            SortKey::NameAsc => a.name.cmp(&b.name),
            SortKey::NameDesc => b.name.cmp(&a.name),
            SortKey::IdAsc => a.id.cmp(&b.id),
            SortKey::IdDesc => b.id.cmp(&a.id),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::IdAsc => "ID (Low-High)",
            SortKey::IdDesc => "ID (High-Low)",
        })
    }
}

/// Current search text, type filter and sort key of the list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub query: String,
    pub type_filter: TypeFilter,
    pub sort_key: SortKey,
}

impl ViewQuery {
    pub fn apply(&self, all: &[Entity]) -> Vec<Entity> {
        view(all, &self.query, self.type_filter, self.sort_key)
    }
}

/// Case-insensitive substring match on the name, or substring match on the decimal id.
fn matches_query(entity: &Entity, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || entity.name.to_lowercase().contains(needle_lower)
        || entity.id.to_string().contains(needle_lower)
}

/// Visible, ordered subset of `all`.
///
/// Ties keep their relative input order (stable sort), so re-filtering is deterministic.
pub fn view(all: &[Entity], query: &str, type_filter: TypeFilter, sort_key: SortKey) -> Vec<Entity> {
    let needle = query.to_lowercase();
    let mut out: Vec<Entity> = all
        .iter()
        .filter(|e| type_filter.matches(e.kind))
        .filter(|e| matches_query(e, &needle))
        .cloned()
        .collect();
    out.sort_by(|a, b| sort_key.compare(a, b));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entity> {
        vec![
            Entity::new(30, "beta", EntityKind::Channel),
            Entity::new(10, "Alpha", EntityKind::Group),
            Entity::new(20, "alpha team", EntityKind::Supergroup),
            Entity::new(5, "Beta", EntityKind::Group),
            Entity::new(40, "", EntityKind::Channel),
            Entity::new(310, "Gamma", EntityKind::Supergroup),
        ]
    }

    fn ids(v: &[Entity]) -> Vec<i64> {
        v.iter().map(|e| e.id).collect()
    }

    #[test]
    fn empty_query_all_types_only_reorders() {
        let all = sample();
        let out = view(&all, "", TypeFilter::All, SortKey::NameAsc);
        assert_eq!(out.len(), all.len());
        // Case-sensitive byte order: "" < "Alpha" < "Beta" < "Gamma" < "alpha team" < "beta"
        assert_eq!(ids(&out), vec![40, 10, 5, 310, 20, 30]);
    }

    #[test]
    fn sorting_own_output_is_idempotent() {
        let all = sample();
        for key in SortKey::ALL {
            let once = view(&all, "", TypeFilter::All, key);
            let twice = view(&once, "", TypeFilter::All, key);
            assert_eq!(once, twice, "{}", key);
        }
    }

    #[test]
    fn descending_and_numeric_orders() {
        let all = sample();
        assert_eq!(
            ids(&view(&all, "", TypeFilter::All, SortKey::NameDesc)),
            vec![30, 20, 310, 5, 10, 40]
        );
        assert_eq!(
            ids(&view(&all, "", TypeFilter::All, SortKey::IdAsc)),
            vec![5, 10, 20, 30, 40, 310]
        );
        assert_eq!(
            ids(&view(&all, "", TypeFilter::All, SortKey::IdDesc)),
            vec![310, 40, 30, 20, 10, 5]
        );
    }

    #[test]
    fn ties_keep_input_order() {
        let all = vec![
            Entity::new(3, "same", EntityKind::Group),
            Entity::new(1, "same", EntityKind::Channel),
            Entity::new(2, "same", EntityKind::Group),
        ];
        assert_eq!(ids(&view(&all, "", TypeFilter::All, SortKey::NameAsc)), vec![3, 1, 2]);
        assert_eq!(ids(&view(&all, "", TypeFilter::All, SortKey::NameDesc)), vec![3, 1, 2]);
    }

    #[test]
    fn text_filter_is_case_insensitive_on_name() {
        let out = view(&sample(), "ALPHA", TypeFilter::All, SortKey::IdAsc);
        assert_eq!(ids(&out), vec![10, 20]);
    }

    #[test]
    fn text_filter_matches_id_substring() {
        let out = view(&sample(), "31", TypeFilter::All, SortKey::IdAsc);
        assert_eq!(ids(&out), vec![310]);
    }

    #[test]
    fn type_filter_then_text_filter() {
        let out = view(&sample(), "beta", TypeFilter::Group, SortKey::IdAsc);
        assert_eq!(ids(&out), vec![5]);
        let out = view(&sample(), "", TypeFilter::Supergroup, SortKey::IdAsc);
        assert_eq!(ids(&out), vec![20, 310]);
    }

    #[test]
    fn result_is_exactly_the_entities_satisfying_both_predicates() {
        let all = sample();
        for filter in TypeFilter::ALL {
            for q in ["", "a", "0", "bet", "zzz"] {
                let out = view(&all, q, filter, SortKey::IdAsc);
                let expected: Vec<i64> = {
                    let mut v: Vec<i64> = all
                        .iter()
                        .filter(|e| filter.matches(e.kind))
                        .filter(|e| {
                            e.name.to_lowercase().contains(q) || e.id.to_string().contains(q)
                        })
                        .map(|e| e.id)
                        .collect();
                    v.sort();
                    v
                };
                assert_eq!(ids(&out), expected, "filter={} q={:?}", filter, q);
            }
        }
    }

    #[test]
    fn view_query_applies_all_three_steps() {
        let q = ViewQuery {
            query: "a".into(),
            type_filter: TypeFilter::Channel,
            sort_key: SortKey::IdDesc,
        };
        assert_eq!(ids(&q.apply(&sample())), vec![30]);
    }
}
