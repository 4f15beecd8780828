//! Server-rendered public pages
//!
//! Templates are compiled into the binary and registered once at startup.

use models::content::{Contact, ContactSubmissionInput};
use models::FieldError;
use serde::Serialize;
use service::content_service::LandingContent;
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../templates/base.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("about.html", include_str!("../templates/about.html")),
    ("contact.html", include_str!("../templates/contact.html")),
];

/// Values typed into the contact form, echoed back when it fails validation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormEcho {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub message: String,
}

impl From<&ContactSubmissionInput> for FormEcho {
    fn from(input: &ContactSubmissionInput) -> Self {
        Self {
            name: input.name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            company: input.company.clone().unwrap_or_default(),
            message: input.message.clone(),
        }
    }
}

/// State of the contact page after a GET or a form post.
#[derive(Debug, Default, Serialize)]
pub struct ContactView {
    pub submitted: bool,
    pub errors: Vec<FieldError>,
    pub form: FormEcho,
}

pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        // base.html 需要与子模板一起注册，extends 才能解析
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }

    pub fn landing(&self, landing: &LandingContent, contact: Option<&Contact>) -> Result<String, tera::Error> {
        let mut context = Context::from_serialize(landing)?;
        context.insert("contact", &contact);
        context.insert("page", "home");
        self.render("index.html", &context)
    }

    pub fn about(&self, contact: Option<&Contact>) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("contact", &contact);
        context.insert("page", "about");
        self.render("about.html", &context)
    }

    pub fn contact(&self, contact: Option<&Contact>, view: &ContactView) -> Result<String, tera::Error> {
        let mut context = Context::from_serialize(view)?;
        context.insert("contact", &contact);
        context.insert("page", "contact");
        self.render("contact.html", &context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::content::{HeroContent, Service};

    fn contact() -> Contact {
        Contact {
            id: 1,
            address1: "1 Main St".into(),
            city1: "Skokie".into(),
            state1: "IL".into(),
            zip1: "60077".into(),
            email: "hello@example.com".into(),
            ..Default::default()
        }
    }

    #[test]
    fn landing_renders_hero_and_services() {
        let pages = Pages::new().unwrap();
        let landing = LandingContent {
            hero: Some(HeroContent {
                id: 1,
                headline: "Back-office support for agencies".into(),
                subheadline: "Coding, QA and billing".into(),
                cta_primary: "Get Started".into(),
                cta_secondary: "Watch Video".into(),
            }),
            services: vec![Service { id: 1, title: "OASIS Review".into(), ..Default::default() }],
            ..Default::default()
        };
        let html = pages.landing(&landing, Some(&contact())).unwrap();
        assert!(html.contains("Back-office support for agencies"));
        assert!(html.contains("OASIS Review"));
        assert!(html.contains("hello@example.com"));
    }

    #[test]
    fn landing_without_hero_still_renders() {
        let pages = Pages::new().unwrap();
        let html = pages.landing(&LandingContent::default(), None).unwrap();
        assert!(html.contains("<html"));
    }

    #[test]
    fn contact_page_escapes_echoed_input() {
        let pages = Pages::new().unwrap();
        let view = ContactView {
            submitted: false,
            errors: vec![FieldError::new("message", "Message must be at least 10 characters.")],
            form: FormEcho { name: "<b>Sam</b>".into(), ..Default::default() },
        };
        let html = pages.contact(None, &view).unwrap();
        assert!(html.contains("Message must be at least 10 characters."));
        assert!(html.contains("&lt;b&gt;Sam&lt;&#x2F;b&gt;"));
        assert!(!html.contains("<b>Sam</b>"));
    }

    #[test]
    fn contact_page_shows_success_banner() {
        let pages = Pages::new().unwrap();
        let view = ContactView { submitted: true, ..Default::default() };
        let html = pages.contact(Some(&contact()), &view).unwrap();
        assert!(html.contains("Thank you for reaching out!"));
        assert!(html.contains("Skokie"));
    }
}
