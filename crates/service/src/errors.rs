use std::fmt;

use thiserror::Error;

/// Which side of the relation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Airline,
    Airport,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Airline => f.write_str("airline"),
            EntityKind::Airport => f.write_str("airport"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("the {0} with the given id was not found")]
    NotFound(EntityKind),
    #[error("the airport with the given id is not associated to the airline")]
    NotAssociated,
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(kind: EntityKind) -> Self { Self::NotFound(kind) }

    /// Domain-rule failures, as opposed to infrastructure faults.
    pub fn is_business(&self) -> bool { !matches!(self, ServiceError::Db(_)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::NotFound(EntityKind::Airline) => 2001,
            ServiceError::NotFound(EntityKind::Airport) => 2002,
            ServiceError::NotAssociated => 2003,
            ServiceError::PreconditionFailed(_) => 2004,
            ServiceError::Validation(_) => 2005,
            ServiceError::Db(_) => 2100,
        }
    }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => ServiceError::Validation(msg),
            models::errors::ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn messages_name_the_failing_entity() {
        assert_eq!(ServiceError::not_found(EntityKind::Airline).to_string(), "the airline with the given id was not found");
        assert_eq!(ServiceError::not_found(EntityKind::Airport).to_string(), "the airport with the given id was not found");
        assert_eq!(ServiceError::NotAssociated.to_string(), "the airport with the given id is not associated to the airline");
    }

    #[test]
    fn model_errors_keep_their_category() {
        let e: ServiceError = ModelError::Validation("name required".into()).into();
        assert!(matches!(e, ServiceError::Validation(_)));
        assert!(e.is_business());

        let e: ServiceError = ModelError::Db("connection reset".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
        assert!(!e.is_business());
        assert_eq!(e.code(), 2100);
    }
}
