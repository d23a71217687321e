//! Notification port
//!
//! Delivery of partnership messages to the editorial team.

use async_trait::async_trait;

use crate::domain::entities::PartnershipRequest;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartnershipNotifier: Send + Sync {
    /// Deliver an already-validated request
    async fn notify(&self, request: &PartnershipRequest) -> Result<(), DomainError>;
}
