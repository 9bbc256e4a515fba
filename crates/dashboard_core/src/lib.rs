//! Core of the admin dashboard client: a poll/fetch/replace pipeline over the
//! backend REST API. The presentation layer consumes cloned state snapshots
//! and owns no business logic.

pub mod config;
pub mod error;
pub mod http;
pub mod loader;
pub mod refresh;
pub mod state;
pub mod stats;
pub mod submit;

pub use config::{load_settings, Settings};
pub use error::{ApiError, TransportError};
pub use http::ApiClient;
pub use loader::LoadOutcome;
pub use refresh::{RefreshEvent, RefreshOrchestrator};
pub use state::{DashboardState, LoadState, ResourceKind, ResourceSlot, StatsSnapshot};
pub use submit::{
    submit_order, submit_product, submit_user, OrderForm, ProductForm, SubmitOutcome, UserForm,
};

#[cfg(test)]
#[path = "tests/refresh_tests.rs"]
mod refresh_tests;

#[cfg(test)]
#[path = "tests/submit_tests.rs"]
mod submit_tests;
