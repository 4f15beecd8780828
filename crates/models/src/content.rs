//! Site entities
//!
//! Typed views over the records of each collection. The store itself is
//! untyped; pages and services decode records into these shapes.

use serde::{Deserialize, Serialize};

use crate::record::{Scalar, Values};

pub const SERVICES: &str = "services";
pub const TESTIMONIALS: &str = "testimonials";
pub const STATISTICS: &str = "statistics";
pub const HERO_CONTENT: &str = "hero-content";
pub const CONTACT: &str = "contact";
pub const CONTACT_SUBMISSIONS: &str = "contact-submissions";

/// Resource names the site knows about, in admin menu order.
pub const RESOURCES: [&str; 6] = [SERVICES, TESTIMONIALS, STATISTICS, HERO_CONTENT, CONTACT, CONTACT_SUBMISSIONS];

/// Map alternate resource names onto their collection (`hero` is the admin
/// screen's name for `hero-content`).
pub fn canonical_resource(name: &str) -> &str {
    match name {
        "hero" => HERO_CONTENT,
        other => other,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Testimonial {
    pub id: i64,
    pub quote: String,
    pub author_name: String,
    pub author_title: String,
    pub company: String,
    pub avatar: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Statistic {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroContent {
    pub id: i64,
    pub headline: String,
    pub subheadline: String,
    pub cta_primary: String,
    pub cta_secondary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub address1: String,
    pub city1: String,
    pub state1: String,
    pub zip1: String,
    pub phone1: String,
    pub address2: String,
    pub city2: String,
    pub state2: String,
    pub zip2: String,
    pub phone2: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub message: String,
    pub created_at: String,
}

/// Public contact form payload. `createdAt` is stamped by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactSubmissionInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub message: String,
}

impl ContactSubmissionInput {
    pub fn into_values(self) -> Values {
        let mut values = Values::new();
        values.insert("name".into(), Scalar::from(self.name));
        values.insert("email".into(), Scalar::from(self.email));
        values.insert("phone".into(), Scalar::from(self.phone));
        // 空公司名按未填写处理
        if let Some(company) = self.company.filter(|c| !c.trim().is_empty()) {
            values.insert("company".into(), Scalar::from(company));
        }
        values.insert("message".into(), Scalar::from(self.message));
        values
    }
}

/// One row of the statistics admin screen, which saves all rows at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticUpdate {
    pub id: i64,
    pub label: String,
    pub value: String,
    pub description: String,
}

impl StatisticUpdate {
    pub fn values(&self) -> Values {
        let mut values = Values::new();
        values.insert("label".into(), Scalar::from(self.label.as_str()));
        values.insert("value".into(), Scalar::from(self.value.as_str()));
        values.insert("description".into(), Scalar::from(self.description.as_str()));
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use serde_json::json;

    #[test]
    fn hero_alias_resolves() {
        assert_eq!(canonical_resource("hero"), HERO_CONTENT);
        assert_eq!(canonical_resource("services"), SERVICES);
    }

    #[test]
    fn record_decodes_into_testimonial() {
        let r: Record = serde_json::from_value(json!({
            "id": 2,
            "quote": "They cleaned up our billing backlog in weeks.",
            "authorName": "Dana Reyes",
            "authorTitle": "Director of Operations",
            "company": "Sunrise Home Care"
        }))
        .unwrap();
        let t: Testimonial = r.to_entity().unwrap();
        assert_eq!(t.id, 2);
        assert_eq!(t.author_name, "Dana Reyes");
        assert_eq!(t.logo, "");
    }

    #[test]
    fn blank_company_is_omitted() {
        let input = ContactSubmissionInput {
            name: "Pat".into(),
            email: "pat@example.com".into(),
            phone: "555-123-4567".into(),
            company: Some("   ".into()),
            message: "Please call me back.".into(),
        };
        let values = input.into_values();
        assert!(!values.contains_key("company"));
        assert_eq!(values.len(), 4);
    }
}
