//! Satellite API client

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::{ApiError, Result};
use crate::models::{Organization, Organizations, SyncPlans};

pub mod decode;
pub mod pagination;
pub mod satellite;

#[allow(unused_imports)]
pub use pagination::{ListResponse, PageCursor, PageNumber};
pub use satellite::SatelliteClient;

/// Satellite API client trait.
///
/// All operations observe the supplied deadline at each page boundary and
/// abort with a timeout error before submitting further requests.
#[async_trait]
pub trait SatelliteApi: Send + Sync {
    /// Retrieve all organizations.
    async fn organizations(&self, deadline: &Deadline) -> Result<Organizations>;

    /// Retrieve sync plans for the given organizations, annotated with
    /// their owning organization. An empty organization list retrieves
    /// the organizations first.
    async fn sync_plans(&self, deadline: &Deadline, orgs: &[Organization]) -> Result<SyncPlans>;

    /// Retrieve all organizations with their sync plans attached. Fails
    /// fast: a failed sync plan fetch for any organization aborts the
    /// whole aggregation.
    async fn organizations_with_sync_plans(&self, deadline: &Deadline) -> Result<Organizations>;
}

/// Process-wide cancellation deadline bounding an entire retrieval run.
#[derive(Debug, Clone, Copy)]
pub struct Deadline(Instant);

impl Deadline {
    pub fn after(timeout: Duration) -> Self {
        Deadline(Instant::now() + timeout)
    }

    /// Returns a timeout error if the deadline has passed.
    pub fn check(&self) -> std::result::Result<(), ApiError> {
        if Instant::now() >= self.0 {
            Err(ApiError::Timeout)
        } else {
            Ok(())
        }
    }

    pub fn remaining(&self) -> Duration {
        self.0.saturating_duration_since(Instant::now())
    }
}
