//! Resource service facade for the Campus LMS admin API.
//!
//! [`Campus`] exposes one async method per backend operation, grouped by
//! area: authentication, courses, certificates, announcements, forums,
//! notifications, payments, admin users and dashboard, and settings. All
//! HTTP concerns (endpoint discovery, bearer auth, 401 handling, envelope
//! decoding) live in `campus-api`; this crate adds typed models, list
//! query normalization, the dual-route fallback, and user-facing errors.
//!
//! ```no_run
//! # async fn demo(campus: campus_core::Campus) -> Result<(), campus_core::CoreError> {
//! use campus_core::{Filters, ListQuery};
//!
//! let query = ListQuery::new(1, 20).with_filters(
//!     Filters::new()
//!         .with("status", Some("completed"))
//!         .with("course", None::<String>),
//! );
//! let page = campus.list_payments(&query).await?;
//! println!("{} payments", page.items.len());
//! # Ok(())
//! # }
//! ```

pub mod campus;
pub mod error;
pub mod fallback;
pub mod model;
pub mod query;
mod services;

pub use campus::Campus;
pub use error::CoreError;
pub use fallback::with_fallback;
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, Filters, ListQuery};
pub use services::{ProfileUpdate, SignIn};

pub use campus_api::{CredentialScope, DeploymentConfig, Resolution, TransportConfig};
