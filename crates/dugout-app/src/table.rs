// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::StatField;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_MAX_SORT_KEYS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: StatField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn asc(field: StatField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub const fn desc(field: StatField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Ordering key: the wire name, prefixed with `-` when descending.
    pub fn ordering_key(&self) -> String {
        match self.direction {
            SortDirection::Asc => self.field.as_str().to_owned(),
            SortDirection::Desc => format!("-{}", self.field.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Number of pages needed for `row_count` rows; never below one.
    pub fn page_count(&self, row_count: u64) -> u32 {
        if self.page_size == 0 {
            return 1;
        }
        let pages = row_count.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub field: StatField,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub sorts: Vec<SortSpec>,
    pub pagination: Pagination,
    pub column_filters: Vec<ColumnFilter>,
    pub global_filter: String,
}

impl TableState {
    pub fn sort_for(&self, field: StatField) -> Option<(usize, SortDirection)> {
        self.sorts
            .iter()
            .position(|sort| sort.field == field)
            .map(|index| (index, self.sorts[index].direction))
    }
}

/// Server query derived from a [`TableState`].
///
/// Filters are carried in the table state but are not part of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsQuery {
    pub ordering: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

impl StatsQuery {
    pub fn from_table_state(state: &TableState) -> Self {
        let ordering = if state.sorts.is_empty() {
            None
        } else {
            Some(
                state
                    .sorts
                    .iter()
                    .map(SortSpec::ordering_key)
                    .collect::<Vec<_>>()
                    .join(","),
            )
        };

        Self {
            ordering,
            page: state.pagination.page_index.saturating_add(1),
            page_size: state.pagination.page_size,
        }
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(ordering) = &self.ordering {
            pairs.push(("ordering", ordering.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("page_size", self.page_size.to_string()));
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnFilter, Pagination, SortSpec, StatsQuery, TableState};
    use crate::StatField;

    #[test]
    fn ordering_preserves_key_order_and_prefixes_descending_keys() {
        let state = TableState {
            sorts: vec![SortSpec::desc(StatField::Hits), SortSpec::asc(StatField::Runs)],
            ..TableState::default()
        };
        let query = StatsQuery::from_table_state(&state);
        assert_eq!(query.ordering.as_deref(), Some("-hits,runs"));
    }

    #[test]
    fn ordering_uses_wire_names() {
        let state = TableState {
            sorts: vec![
                SortSpec::asc(StatField::OnBasePlusSlugging),
                SortSpec::desc(StatField::Doubles),
                SortSpec::asc(StatField::PlayerName),
            ],
            ..TableState::default()
        };
        let query = StatsQuery::from_table_state(&state);
        assert_eq!(
            query.ordering.as_deref(),
            Some("on_base_plus_slugging,-double_2b,player_name")
        );
    }

    #[test]
    fn empty_sort_omits_ordering_pair() {
        let query = StatsQuery::from_table_state(&TableState::default());
        assert_eq!(query.ordering, None);
        assert_eq!(
            query.to_query_pairs(),
            vec![("page", "1".to_owned()), ("page_size", "10".to_owned())]
        );
    }

    #[test]
    fn page_index_is_serialized_one_based() {
        let mut state = TableState::default();
        let first = StatsQuery::from_table_state(&state);
        assert_eq!((first.page, first.page_size), (1, 10));

        state.pagination.page_index = 2;
        let third = StatsQuery::from_table_state(&state);
        assert_eq!(third.page, 3);
    }

    #[test]
    fn filters_do_not_reach_the_query() {
        let plain = StatsQuery::from_table_state(&TableState::default());
        let filtered = StatsQuery::from_table_state(&TableState {
            column_filters: vec![ColumnFilter {
                field: StatField::Position,
                value: "SS".to_owned(),
            }],
            global_filter: "diaz".to_owned(),
            ..TableState::default()
        });
        assert_eq!(plain, filtered);
    }

    #[test]
    fn query_pairs_put_ordering_first() {
        let query = StatsQuery {
            ordering: Some("-hits".to_owned()),
            page: 4,
            page_size: 25,
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("ordering", "-hits".to_owned()),
                ("page", "4".to_owned()),
                ("page_size", "25".to_owned()),
            ]
        );
    }

    #[test]
    fn page_count_rounds_up_and_never_drops_below_one() {
        let pagination = Pagination::default();
        assert_eq!(pagination.page_count(0), 1);
        assert_eq!(pagination.page_count(10), 1);
        assert_eq!(pagination.page_count(57), 6);
    }
}
