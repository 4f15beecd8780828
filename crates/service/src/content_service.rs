use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use models::content::{
    self, Contact, ContactSubmissionInput, HeroContent, Service, Statistic, StatisticUpdate, Testimonial,
};
use models::validation::{self, Mode};
use models::{Record, RecordKey, Scalar, Values};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::provider::DataProvider;
use crate::query::ListParams;

/// Everything the landing page shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingContent {
    pub hero: Option<HeroContent>,
    pub statistics: Vec<Statistic>,
    pub services: Vec<Service>,
    pub testimonials: Vec<Testimonial>,
}

/// Application service for the public pages and the admin forms.
/// Validation happens here; the provider stores whatever it is given.
#[derive(Clone)]
pub struct ContentService {
    provider: Arc<dyn DataProvider>,
}

impl ContentService {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self { Self { provider } }

    pub fn provider(&self) -> &Arc<dyn DataProvider> { &self.provider }

    async fn entities<T: serde::de::DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, ServiceError> {
        let res = self.provider.list(resource, ListParams::default()).await;
        res.data
            .iter()
            .map(|r| r.to_entity::<T>().map_err(ServiceError::from))
            .collect()
    }

    pub async fn landing(&self) -> Result<LandingContent, ServiceError> {
        let hero = self.entities::<HeroContent>(content::HERO_CONTENT).await?.into_iter().next();
        Ok(LandingContent {
            hero,
            statistics: self.entities(content::STATISTICS).await?,
            services: self.entities(content::SERVICES).await?,
            testimonials: self.entities(content::TESTIMONIALS).await?,
        })
    }

    /// First `contact` record, if the collection has one.
    pub async fn contact_info(&self) -> Result<Option<Contact>, ServiceError> {
        Ok(self.entities::<Contact>(content::CONTACT).await?.into_iter().next())
    }

    #[instrument(skip_all)]
    pub async fn submit_contact(&self, input: ContactSubmissionInput) -> Result<Record, ServiceError> {
        let mut values = input.into_values();
        validation::validate(content::CONTACT_SUBMISSIONS, &values, Mode::Full)?;
        values.insert("createdAt".into(), Scalar::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)));
        let record = self.provider.create(content::CONTACT_SUBMISSIONS, values).await?;
        info!(id = record.id, "contact_submission_stored");
        Ok(record)
    }

    pub async fn create_record(&self, resource: &str, values: Values) -> Result<Record, ServiceError> {
        validation::validate(resource, &values, Mode::Full)?;
        self.provider.create(resource, values).await
    }

    /// Only the supplied fields are checked.
    pub async fn update_record(&self, resource: &str, id: RecordKey, values: Values) -> Result<Record, ServiceError> {
        validation::validate(resource, &values, Mode::Partial)?;
        self.provider.update(resource, id, values).await
    }

    /// Save every row of the statistics screen. All rows are validated
    /// before any is written; a missing id stops the batch there.
    #[instrument(skip(self, batch), fields(count = batch.len()))]
    pub async fn update_statistics(&self, batch: Vec<StatisticUpdate>) -> Result<Vec<Record>, ServiceError> {
        for row in &batch {
            validation::validate(content::STATISTICS, &row.values(), Mode::Full)?;
        }
        let mut updated = Vec::with_capacity(batch.len());
        for row in batch {
            let record = self.provider.update(content::STATISTICS, RecordKey::from(row.id), row.values()).await?;
            updated.push(record);
        }
        info!(count = updated.len(), "statistics_updated");
        Ok(updated)
    }
}
