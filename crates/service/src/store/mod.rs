//! Persistence seam consumed by the services.
//!
//! Stores resolve entities by id, optionally with the opposite side of the
//! relation loaded, and persist entities and association sets. Mutating
//! association workflows run inside a [`TransactionalStore::begin`] transaction
//! so the reads they validate against and the write they make are atomic.

use std::collections::BTreeSet;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Airline, Airport};
use crate::errors::ServiceError;

pub mod mock;
pub mod seaorm;

pub use seaorm::SeaOrmStore;

#[async_trait]
pub trait AirlineStore: Send + Sync {
    async fn find_airline(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airline>, ServiceError>;
    async fn list_airlines(&self, load_with_associations: bool) -> Result<Vec<Airline>, ServiceError>;
    /// Upsert scalar fields. The returned airline has no relation loaded.
    async fn save_airline(&self, airline: &Airline) -> Result<Airline, ServiceError>;
    /// Persist the exact association set of one airline (both directions).
    async fn save_airline_airports(&self, airline_id: Uuid, airport_ids: &BTreeSet<Uuid>) -> Result<(), ServiceError>;
    /// Unlink from every airport, then delete.
    async fn remove_airline(&self, id: Uuid) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait AirportStore: Send + Sync {
    async fn find_airport(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airport>, ServiceError>;
    async fn list_airports(&self, load_with_associations: bool) -> Result<Vec<Airport>, ServiceError>;
    /// Upsert scalar fields. The returned airport has no relation loaded.
    async fn save_airport(&self, airport: &Airport) -> Result<Airport, ServiceError>;
    /// Unlink from every airline, then delete.
    async fn remove_airport(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// An open unit of work. Dropping it without `commit` discards its writes.
#[async_trait]
pub trait StoreTransaction: AirlineStore + AirportStore {
    async fn commit(self) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait TransactionalStore: AirlineStore + AirportStore {
    type Tx: StoreTransaction;

    async fn begin(&self) -> Result<Self::Tx, ServiceError>;
}
