use std::sync::Arc;

use service::content_service::ContentService;
use service::DataProvider;

use crate::errors::StartupError;
use crate::pages::Pages;

/// Shared router state. Cloning is cheap; everything sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn DataProvider>,
    pub content: ContentService,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(provider: Arc<dyn DataProvider>) -> Result<Self, StartupError> {
        let content = ContentService::new(Arc::clone(&provider));
        let pages = Arc::new(Pages::new()?);
        Ok(Self { provider, content, pages })
    }
}
