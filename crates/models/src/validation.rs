//! Per-resource form rules.
//!
//! Only presence, minimum length and format checks. Unknown fields pass
//! through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::{self, canonical_resource};
use crate::errors::{FieldError, ModelError};
use crate::record::{Scalar, Values};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?\(?[0-9]{1,3}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,4}[-\s.]?[0-9]{1,9}$")
        .expect("valid phone regex")
});

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    MinLen(usize, &'static str),
    Email(&'static str),
    Phone(&'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        match *self {
            Rule::MinLen(min, msg) if value.chars().count() < min => Err(msg),
            Rule::Email(msg) if !EMAIL_RE.is_match(value) => Err(msg),
            Rule::Phone(msg) if !PHONE_RE.is_match(value) => Err(msg),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub optional: bool,
    pub rules: &'static [Rule],
}

const fn required(name: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, optional: false, rules }
}

const fn optional(name: &'static str, rules: &'static [Rule]) -> FieldSpec {
    FieldSpec { name, optional: true, rules }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub resource: &'static str,
    pub fields: &'static [FieldSpec],
}

/// Whether absent fields are checked (create) or skipped (partial update).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Full,
    Partial,
}

pub static SERVICE_SCHEMA: Schema = Schema {
    resource: content::SERVICES,
    fields: &[
        required("title", &[Rule::MinLen(2, "Title must be at least 2 characters.")]),
        required("description", &[Rule::MinLen(10, "Description must be at least 10 characters.")]),
        required("category", &[Rule::MinLen(1, "Category is required.")]),
        required("icon", &[Rule::MinLen(1, "Icon is required.")]),
    ],
};

pub static TESTIMONIAL_SCHEMA: Schema = Schema {
    resource: content::TESTIMONIALS,
    fields: &[
        required("quote", &[Rule::MinLen(10, "Quote must be at least 10 characters.")]),
        required("authorName", &[Rule::MinLen(2, "Client name must be at least 2 characters.")]),
        required("authorTitle", &[Rule::MinLen(2, "Client title must be at least 2 characters.")]),
        required("company", &[Rule::MinLen(2, "Company name must be at least 2 characters.")]),
        optional("logo", &[]),
        optional("avatar", &[]),
    ],
};

pub static STATISTIC_SCHEMA: Schema = Schema {
    resource: content::STATISTICS,
    fields: &[
        required("label", &[Rule::MinLen(1, "Label is required")]),
        required("value", &[Rule::MinLen(1, "Value is required")]),
        required("description", &[Rule::MinLen(1, "Description is required")]),
    ],
};

pub static HERO_SCHEMA: Schema = Schema {
    resource: content::HERO_CONTENT,
    fields: &[
        required("headline", &[Rule::MinLen(10, "Headline must be at least 10 characters")]),
        required("subheadline", &[Rule::MinLen(10, "Subheadline must be at least 10 characters")]),
        required("ctaPrimary", &[Rule::MinLen(2, "Primary CTA text is required")]),
        required("ctaSecondary", &[Rule::MinLen(2, "Secondary CTA text is required")]),
    ],
};

pub static CONTACT_SCHEMA: Schema = Schema {
    resource: content::CONTACT,
    fields: &[
        required("address1", &[Rule::MinLen(1, "Address is required")]),
        required("city1", &[Rule::MinLen(1, "City is required")]),
        required("state1", &[Rule::MinLen(1, "State is required")]),
        required("zip1", &[Rule::MinLen(1, "ZIP code is required")]),
        required("phone1", &[Rule::MinLen(1, "Phone number is required")]),
        required("address2", &[Rule::MinLen(1, "Address is required")]),
        required("city2", &[Rule::MinLen(1, "City is required")]),
        required("state2", &[Rule::MinLen(1, "State is required")]),
        required("zip2", &[Rule::MinLen(1, "ZIP code is required")]),
        required("phone2", &[Rule::MinLen(1, "Phone number is required")]),
        required("email", &[Rule::Email("Invalid email address")]),
    ],
};

pub static CONTACT_SUBMISSION_SCHEMA: Schema = Schema {
    resource: content::CONTACT_SUBMISSIONS,
    fields: &[
        required("name", &[Rule::MinLen(2, "Name must be at least 2 characters.")]),
        required("email", &[Rule::Email("Please enter a valid email address.")]),
        required(
            "phone",
            &[
                Rule::MinLen(10, "Please enter a valid phone number."),
                Rule::Phone("Please enter a valid phone number format."),
            ],
        ),
        optional("company", &[]),
        required("message", &[Rule::MinLen(10, "Message must be at least 10 characters.")]),
    ],
};

/// Schema for a resource name (aliases accepted); `None` for resources
/// without form rules.
pub fn schema_for(resource: &str) -> Option<&'static Schema> {
    match canonical_resource(resource) {
        content::SERVICES => Some(&SERVICE_SCHEMA),
        content::TESTIMONIALS => Some(&TESTIMONIAL_SCHEMA),
        content::STATISTICS => Some(&STATISTIC_SCHEMA),
        content::HERO_CONTENT => Some(&HERO_SCHEMA),
        content::CONTACT => Some(&CONTACT_SCHEMA),
        content::CONTACT_SUBMISSIONS => Some(&CONTACT_SUBMISSION_SCHEMA),
        _ => None,
    }
}

impl Schema {
    /// Check `values`, collecting the first failing rule of every field.
    pub fn validate(&self, values: &Values, mode: Mode) -> Result<(), ModelError> {
        let mut errors = Vec::new();
        for field in self.fields {
            let text = match values.get(field.name) {
                None if mode == Mode::Partial => continue,
                None | Some(Scalar::Null) => {
                    if !field.optional {
                        errors.push(FieldError::new(field.name, "Required"));
                    }
                    continue;
                }
                Some(Scalar::Number(_)) => {
                    errors.push(FieldError::new(field.name, "Expected text"));
                    continue;
                }
                Some(Scalar::Text(s)) => s,
            };
            if field.optional && text.is_empty() {
                continue;
            }
            if let Some(msg) = field.rules.iter().find_map(|r| r.check(text).err()) {
                errors.push(FieldError::new(field.name, msg));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ModelError::Validation(errors))
        }
    }
}

/// Validate against the resource's schema; resources without one pass.
pub fn validate(resource: &str, values: &Values, mode: Mode) -> Result<(), ModelError> {
    match schema_for(resource) {
        Some(schema) => schema.validate(values, mode),
        None => Ok(()),
    }
}
