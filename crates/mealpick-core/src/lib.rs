//! Core library for mealpick.
//!
//! This crate holds everything the presentation layers share:
//!
//! - `catalog`: the static meal table and the `HealthCondition` labels
//! - `recommend`: the budget-window filter over the catalog
//! - `auth`: in-memory `CredentialStore` and per-session `Session` state
//! - `context`: `MealContext`, the explicit object tying a session to a store
//! - `config`: read-only user preferences loaded from the config directory
//! - `error`: domain errors surfaced to the UI

pub mod auth;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod recommend;

pub use auth::{CredentialStore, Session};
pub use catalog::{HealthCondition, MealEntry, CATALOG};
pub use config::Config;
pub use context::MealContext;
pub use error::{AuthError, MealError, RecommendError};
pub use recommend::{recommend, recommend_labels, Budget, BudgetWindow, Recommendation};
