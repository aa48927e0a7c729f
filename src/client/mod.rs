//! Remote data access for the referral service.

pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;

use async_trait::async_trait;

use crate::domain::{ListFilter, Referral, ReferralChanges, ReferralDraft, ReferralPage};

pub use error::ClientError;
pub use http::HttpReferralApi;

/// The five calls the application makes against the referral service.
#[async_trait]
pub trait ReferralApi: Send + Sync {
    async fn list(&self, filter: &ListFilter) -> Result<ReferralPage, ClientError>;

    async fn get(&self, id: i64) -> Result<Referral, ClientError>;

    async fn create(&self, draft: &ReferralDraft) -> Result<Referral, ClientError>;

    async fn update(&self, id: i64, changes: &ReferralChanges) -> Result<Referral, ClientError>;

    async fn delete(&self, id: i64) -> Result<(), ClientError>;
}
