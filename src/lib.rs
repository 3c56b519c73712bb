//! Invoice and customer dashboard backend.
//!
//! Form actions validate and persist input; read functions search, paginate
//! and format data for the dashboard's list pages.

pub mod actions;
pub mod config;
pub mod data;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use db::{get_client, Database};
pub use error::{DashboardError, Result};
