// Facade operations, one file per resource area. Each file adds an
// `impl Campus` block.

mod admin;
mod announcements;
mod auth;
mod certificates;
mod courses;
mod forums;
mod notifications;
mod payments;
mod settings;

pub use auth::{ProfileUpdate, SignIn};
