//! Error conversion glue between the domain and service layers.
//!
//! The domain layer must not depend on service error types, so the
//! conversion lives here.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_errors_keep_their_message() {
        let err = ServiceError::from(TypeConstraintError::InvalidRating);
        assert_eq!(err.to_string(), "invalid value: rating must be between 1 and 5");
    }
}
