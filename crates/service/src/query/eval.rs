//! Filter evaluation and sort comparison over records.

use std::cmp::Ordering;

use models::Record;

use super::{Filter, FilterOperator, SortOrder, Sorter};

impl Filter {
    /// Whether `record` passes this filter.
    pub fn matches(&self, record: &Record) -> bool {
        if self.value.is_falsy() {
            return true;
        }
        let field = record.field(&self.field);
        let Some(value) = field.as_deref() else {
            // 缺失字段：只有 ne 成立
            return self.operator == FilterOperator::Ne;
        };

        match self.operator {
            FilterOperator::Eq => value.typed_eq(&self.value),
            FilterOperator::Ne => !value.typed_eq(&self.value),
            FilterOperator::Lt => value.typed_cmp(&self.value) == Some(Ordering::Less),
            FilterOperator::Gt => value.typed_cmp(&self.value) == Some(Ordering::Greater),
            FilterOperator::Lte => matches!(value.typed_cmp(&self.value), Some(Ordering::Less | Ordering::Equal)),
            FilterOperator::Gte => {
                matches!(value.typed_cmp(&self.value), Some(Ordering::Greater | Ordering::Equal))
            }
            FilterOperator::Contains => {
                if value.is_null() {
                    return false;
                }
                value
                    .as_text()
                    .to_lowercase()
                    .contains(&self.value.as_text().to_lowercase())
            }
        }
    }
}

/// Logical AND over all filters.
pub fn matches_all(record: &Record, filters: &[Filter]) -> bool {
    filters.iter().all(|f| f.matches(record))
}

/// Locale-style collation: case-insensitive first; on a tie lowercase
/// sorts before uppercase.
pub fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Compare two records along the sorter chain. Values are compared by
/// their text form; a missing field sorts as an empty string.
pub fn compare_records(a: &Record, b: &Record, sorters: &[Sorter]) -> Ordering {
    for sorter in sorters {
        let left = a.field(&sorter.field).map(|v| v.as_text().into_owned()).unwrap_or_default();
        let right = b.field(&sorter.field).map(|v| v.as_text().into_owned()).unwrap_or_default();
        let ord = match sorter.order {
            SortOrder::Asc => collate(&left, &right),
            SortOrder::Desc => collate(&right, &left),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
