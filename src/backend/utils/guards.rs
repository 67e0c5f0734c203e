// src/backend/utils/guards.rs
use crate::error::StoryError;
use crate::models::common::{Cycles, PrincipalId};

/// Checks that `caller` is the designated admin principal.
///
/// # Errors
///
/// Returns `StoryError::Unauthorized` if the caller is not the admin.
pub fn check_admin(admin_principal: PrincipalId, caller: PrincipalId) -> Result<(), StoryError> {
    if caller == admin_principal {
        Ok(())
    } else {
        Err(StoryError::Unauthorized(format!(
            "Caller {} is not the platform administrator",
            caller
        )))
    }
}

/// Checks that the canister holds at least `threshold` cycles.
///
/// # Errors
///
/// Returns `StoryError::CycleLow` if the balance is below the threshold.
pub fn check_cycles(balance: Cycles, threshold: Cycles) -> Result<(), StoryError> {
    if balance < threshold {
        Err(StoryError::CycleLow)
    } else {
        Ok(())
    }
}
