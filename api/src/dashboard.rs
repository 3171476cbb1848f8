//! `/dashboard` endpoints

use crate::client::MarketplaceClient;
use crate::error::ApiError;
use crate::types::DashboardStats;

impl MarketplaceClient {
    /// Organizer dashboard figures
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-success status.
    pub async fn organization_dashboard(&self) -> Result<DashboardStats, ApiError> {
        Self::send_json(self.get("/dashboard/organization")).await
    }
}
