pub mod api;
pub mod app;
pub mod config;
pub mod controller;
pub mod drilldown;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod models;
pub mod period;
pub mod session;
pub mod state;
pub mod ui;
pub mod view;

pub use api::{DashboardApi, HttpApi, TransactionQuery};
pub use app::router;
pub use config::Config;
pub use controller::DashboardController;
pub use period::Period;
pub use state::AppState;
