use crate::application::error::ServiceResult;

/// Placeholder for profile lookups; the caller's token claims are the profile.
pub struct Profile;

impl Profile {
    pub async fn execute(&self) -> ServiceResult<()> {
        Ok(())
    }
}
