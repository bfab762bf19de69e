//! Hosted-database persistence for the finance tracker.
//!
//! [`CloudStoreClient`] talks to a PostgREST-style REST API and implements the
//! core [`RemoteStoreTrait`](finance_tracker_core::store::RemoteStoreTrait).

mod client;
mod config;
mod error;
mod store;
mod types;

pub use client::CloudStoreClient;
pub use config::{CloudConfig, SUPABASE_ANON_KEY_ENV, SUPABASE_URL_ENV};
pub use error::{ApiRetryClass, CloudError, Result};
pub use types::ApiErrorResponse;
