use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::role::models::Role;

/// Read access to role definitions.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Retrieve role by its code.
    ///
    /// # Arguments
    /// * `code` - Role code, e.g. `"patient"`
    ///
    /// # Returns
    /// Optional role entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_code(&self, code: &str) -> Result<Option<Role>, RepositoryError>;
}
