use rand::Rng;

use crate::error::AppError;

/// Four-digit handover PIN in 1000..=9999.
pub fn generate_pin() -> String {
    rand::thread_rng().gen_range(1000..=9999).to_string()
}

pub fn verify_pin(expected: Option<&str>, entered: Option<&str>, kind: &str) -> Result<(), AppError> {
    let expected = expected
        .map(str::trim)
        .filter(|pin| !pin.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{kind} PIN has not been generated yet")))?;
    let entered = entered
        .map(str::trim)
        .ok_or_else(|| AppError::BadRequest(format!("{kind} PIN is required")))?;

    if entered != expected {
        return Err(AppError::BadRequest(format!("{kind} PIN does not match")));
    }
    Ok(())
}
