use crate::api::HttpApi;
use crate::controller::DashboardController;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: DashboardController<HttpApi>,
    pub currency: Arc<str>,
}

impl AppState {
    pub fn new(api: HttpApi, day_page_size: u32, currency: &str) -> Self {
        Self {
            controller: DashboardController::new(api, day_page_size),
            currency: Arc::from(currency),
        }
    }
}
