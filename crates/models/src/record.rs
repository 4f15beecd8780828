//! Untyped record model
//!
//! Every collection holds flat records: a numeric `id` plus named scalar
//! fields. Comparisons are typed: the record side decides whether a value
//! is compared as a number or as text.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::ModelError;

/// Field map used for records and for create/update input.
pub type Values = BTreeMap<String, Scalar>;

/// A single field value: `null`, a number or a string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Number(Number),
    Text(String),
}

impl Scalar {
    /// `null`, `""` and `0` count as "no value" for filters.
    pub fn is_falsy(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.is_empty(),
            Scalar::Number(n) => n.as_f64().map_or(true, |f| f == 0.0),
        }
    }

    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Null => Cow::Borrowed("null"),
            Scalar::Number(n) => Cow::Owned(number_text(n)),
            Scalar::Text(s) => Cow::Borrowed(s.as_str()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Compare a record value (`self`) against a query value.
    ///
    /// Numeric fields parse text targets as numbers; text fields compare
    /// against the text form of numeric targets. Anything involving `null`
    /// is incomparable.
    pub fn typed_cmp(&self, target: &Scalar) -> Option<Ordering> {
        match (self, target) {
            (Scalar::Null, _) | (_, Scalar::Null) => None,
            (Scalar::Number(a), Scalar::Number(b)) => number_cmp(a, b),
            (Scalar::Number(a), Scalar::Text(b)) => {
                let b: Number = b.trim().parse().ok()?;
                number_cmp(a, &b)
            }
            (Scalar::Text(a), Scalar::Text(b)) => Some(a.as_str().cmp(b.as_str())),
            (Scalar::Text(a), Scalar::Number(b)) => Some(a.as_str().cmp(number_text(b).as_str())),
        }
    }

    pub fn typed_eq(&self, target: &Scalar) -> bool {
        self.typed_cmp(target) == Some(Ordering::Equal)
    }
}

/// Integers compare exactly; anything else goes through `f64`.
fn number_cmp(a: &Number, b: &Number) -> Option<Ordering> {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => Some(x.cmp(&y)),
        _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
    }
}

/// Integral floats print without a fractional part (`3.0` -> `3`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self { Scalar::Text(s.to_string()) }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self { Scalar::Text(s) }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self { Scalar::Number(Number::from(n)) }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Scalar::Null, Scalar::Number)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

/// Requested identifier. Numbers and strings are interchangeable: `3` and
/// `"3"` address the same record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawKey", into = "String")]
pub struct RecordKey(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Number(Number),
    Text(String),
}

impl From<RawKey> for RecordKey {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Number(n) => RecordKey(number_text(&n)),
            RawKey::Text(s) => RecordKey(s),
        }
    }
}

impl From<RecordKey> for String {
    fn from(key: RecordKey) -> Self { key.0 }
}

impl RecordKey {
    pub fn matches(&self, id: i64) -> bool {
        self.0 == id.to_string()
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl From<i64> for RecordKey {
    fn from(id: i64) -> Self { RecordKey(id.to_string()) }
}

impl From<&str> for RecordKey {
    fn from(id: &str) -> Self { RecordKey(id.to_string()) }
}

impl From<String> for RecordKey {
    fn from(id: String) -> Self { RecordKey(id) }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stored entity, serialised flat as `{"id": 1, "field": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Values,
}

impl Record {
    /// Build a record from input values; an `id` entry in `values` is dropped.
    pub fn from_values(id: i64, mut values: Values) -> Self {
        values.remove("id");
        Self { id, fields: values }
    }

    /// Field lookup, `id` included.
    pub fn field(&self, name: &str) -> Option<Cow<'_, Scalar>> {
        if name == "id" {
            return Some(Cow::Owned(Scalar::from(self.id)));
        }
        self.fields.get(name).map(Cow::Borrowed)
    }

    /// Shallow merge: supplied fields overwrite, the rest (and `id`) stay.
    pub fn merge(&mut self, values: Values) {
        for (k, v) in values {
            if k != "id" {
                self.fields.insert(k, v);
            }
        }
    }

    /// Decode into one of the typed entities in `content`.
    pub fn to_entity<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        let value = serde_json::to_value(self).map_err(|e| ModelError::Decode(e.to_string()))?;
        serde_json::from_value(value).map_err(|e| ModelError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> Record {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn record_serializes_flat() {
        let r = record(json!({"id": 1, "title": "A", "rank": 2, "note": null}));
        assert_eq!(r.id, 1);
        assert_eq!(r.fields.get("title"), Some(&Scalar::from("A")));
        assert_eq!(r.fields.get("note"), Some(&Scalar::Null));
        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back, json!({"id": 1, "title": "A", "rank": 2, "note": null}));
    }

    #[test]
    fn booleans_are_not_scalars() {
        let res: Result<Scalar, _> = serde_json::from_value(json!(true));
        assert!(res.is_err());
    }

    #[test]
    fn record_key_accepts_numbers_and_strings() {
        let a: RecordKey = serde_json::from_value(json!(3)).unwrap();
        let b: RecordKey = serde_json::from_value(json!("3")).unwrap();
        assert_eq!(a, b);
        assert!(a.matches(3));
        assert!(!RecordKey::from("03").matches(3));
    }

    #[test]
    fn typed_comparison_follows_the_record_side() {
        let n = Scalar::from(10);
        assert_eq!(n.typed_cmp(&Scalar::from("9")), Some(Ordering::Greater));
        assert!(n.typed_eq(&Scalar::from("10")));
        assert_eq!(n.typed_cmp(&Scalar::from("ten")), None);

        let t = Scalar::from("10");
        // text fields compare lexically, even against numbers
        assert_eq!(t.typed_cmp(&Scalar::from(9)), Some(Ordering::Less));
        assert!(t.typed_eq(&Scalar::from(10)));

        assert_eq!(Scalar::Null.typed_cmp(&Scalar::from(1)), None);
    }

    #[test]
    fn large_integers_compare_exactly() {
        let big = Scalar::from(9_007_199_254_740_992i64);
        assert!(!big.typed_eq(&Scalar::from(9_007_199_254_740_993i64)));
        assert!(!big.typed_eq(&Scalar::from("9007199254740993")));
        assert!(big.typed_eq(&Scalar::from("9007199254740992")));
        assert_eq!(big.typed_cmp(&Scalar::from(9_007_199_254_740_993i64)), Some(Ordering::Less));
        // 整数与小数混合时仍按 f64 比较
        assert_eq!(Scalar::from(2i64).typed_cmp(&Scalar::from(2.5)), Some(Ordering::Less));
    }

    #[test]
    fn falsy_values() {
        assert!(Scalar::Null.is_falsy());
        assert!(Scalar::from("").is_falsy());
        assert!(Scalar::from(0).is_falsy());
        assert!(!Scalar::from("0").is_falsy());
        assert!(!Scalar::from(2.5).is_falsy());
    }

    #[test]
    fn text_coercion_of_numbers() {
        assert_eq!(Scalar::from(3).as_text(), "3");
        assert_eq!(Scalar::from(3.0).as_text(), "3");
        assert_eq!(Scalar::from(3.5).as_text(), "3.5");
        assert_eq!(Scalar::Null.as_text(), "null");
    }

    #[test]
    fn merge_keeps_id_and_unspecified_fields() {
        let mut r = record(json!({"id": 4, "title": "A", "icon": "users"}));
        let mut values = Values::new();
        values.insert("title".into(), Scalar::from("B"));
        values.insert("id".into(), Scalar::from(99));
        r.merge(values);
        assert_eq!(r.id, 4);
        assert_eq!(r.field("title").unwrap().as_text(), "B");
        assert_eq!(r.field("icon").unwrap().as_text(), "users");
        assert_eq!(r.field("id").unwrap().into_owned(), Scalar::from(4));
    }

    #[test]
    fn from_values_drops_incoming_id() {
        let mut values = Values::new();
        values.insert("id".into(), Scalar::from(7));
        values.insert("label".into(), Scalar::from("x"));
        let r = Record::from_values(2, values);
        assert_eq!(r.id, 2);
        assert!(!r.fields.contains_key("id"));
    }
}
