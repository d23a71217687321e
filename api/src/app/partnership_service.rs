//! Partnership service
//!
//! Validates contact requests from the site and hands them to the notifier.

use std::sync::Arc;

use crate::domain::entities::PartnershipRequest;
use crate::domain::ports::PartnershipNotifier;
use crate::error::AppError;

pub struct PartnershipService<PN>
where
    PN: PartnershipNotifier + ?Sized,
{
    notifier: Arc<PN>,
}

impl<PN> PartnershipService<PN>
where
    PN: PartnershipNotifier + ?Sized,
{
    pub fn new(notifier: Arc<PN>) -> Self {
        Self { notifier }
    }

    pub async fn submit(&self, request: PartnershipRequest) -> Result<(), AppError> {
        let request = request.validated()?;
        self.notifier.notify(&request).await?;
        Ok(())
    }
}
