//! Declarative list parameters: filters, sorters and pagination.
//!
//! The JSON shape follows the admin data-provider contract
//! (`{"field": "category", "operator": "eq", "value": "coding"}`); the text
//! shapes (`category:eq:coding`, `title:desc`) are used by query strings.

use std::fmt;
use std::str::FromStr;

use models::Scalar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::Pagination;

pub mod eval;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryParseError {
    #[error("invalid filter `{0}`: expected field:operator:value")]
    Filter(String),
    #[error("unknown filter operator `{0}`")]
    Operator(String),
    #[error("invalid sorter `{0}`: expected field[:asc|desc]")]
    Sorter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Contains,
}

impl FromStr for FilterOperator {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "lt" => Ok(Self::Lt),
            "gt" => Ok(Self::Gt),
            "lte" => Ok(Self::Lte),
            "gte" => Ok(Self::Gte),
            "contains" => Ok(Self::Contains),
            _ => Err(QueryParseError::Operator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Lte => "lte",
            Self::Gte => "gte",
            Self::Contains => "contains",
        };
        f.write_str(s)
    }
}

/// A single predicate. A falsy `value` (`null`, `""`, `0`) disables it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub operator: FilterOperator,
    #[serde(default)]
    pub value: Scalar,
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Scalar>) -> Self {
        Self { field: field.into(), operator, value: value.into() }
    }
}

/// Query-string values: canonical numbers (`0`, `12`, `-3`, `2.5`) become
/// numbers, everything else stays text. `007` or `3.0` stay text so they
/// still match text fields verbatim.
fn parse_value(raw: &str) -> Scalar {
    match serde_json::from_str::<serde_json::Number>(raw) {
        Ok(n) => {
            let number = Scalar::Number(n);
            if number.as_text() == raw {
                number
            } else {
                Scalar::from(raw)
            }
        }
        Err(_) => Scalar::from(raw),
    }
}

/// `field:op:value`; everything after the second `:` is the value.
impl FromStr for Filter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(op), value) if !field.trim().is_empty() => Ok(Self {
                field: field.trim().to_string(),
                operator: op.trim().parse()?,
                value: parse_value(value.unwrap_or_default()),
            }),
            _ => Err(QueryParseError::Filter(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One ordering directive; several sorters form a priority chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorter {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl Sorter {
    pub fn asc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Asc }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self { field: field.into(), order: SortOrder::Desc }
    }
}

impl FromStr for Sorter {
    type Err = QueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = match s.split_once(':') {
            Some((field, order)) => (field.trim(), order.trim()),
            None => (s.trim(), "asc"),
        };
        if field.is_empty() {
            return Err(QueryParseError::Sorter(s.to_string()));
        }
        let order = match order.to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            _ => return Err(QueryParseError::Sorter(s.to_string())),
        };
        Ok(Self { field: field.to_string(), order })
    }
}

/// Parse `;`-separated filters, skipping empty segments.
pub fn parse_filters(s: &str) -> Result<Vec<Filter>, QueryParseError> {
    s.split(';').filter(|p| !p.trim().is_empty()).map(str::parse).collect()
}

/// Parse `,`-separated sorters, skipping empty segments.
pub fn parse_sorters(s: &str) -> Result<Vec<Sorter>, QueryParseError> {
    s.split(',').filter(|p| !p.trim().is_empty()).map(str::parse).collect()
}

/// Everything `list` accepts besides the resource name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    pub filters: Vec<Filter>,
    pub sorters: Vec<Sorter>,
    pub pagination: Option<Pagination>,
}

impl ListParams {
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sorter: Sorter) -> Self {
        self.sorters.push(sorter);
        self
    }

    pub fn page(mut self, current_page: usize, page_size: usize) -> Self {
        self.pagination = Some(Pagination::new(current_page, page_size));
        self
    }
}
