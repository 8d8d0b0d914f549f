//! Service layer: airline and airport business rules and the association
//! workflows between them.
//! - Separates business logic from data access (see [`store`]).
//! - Reuses field validation and entity definitions from the `models` crate.
//! - Reports failures through [`errors::ServiceError`].

pub mod errors;
pub mod domain;
pub mod store;
pub mod airline_service;
pub mod airport_service;
pub mod association_service;
#[cfg(test)]
pub mod test_support;

pub use airline_service::AirlineService;
pub use airport_service::AirportService;
pub use association_service::AssociationService;
