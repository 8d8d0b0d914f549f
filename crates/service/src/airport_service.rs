use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{Airport, AirportInput};
use crate::errors::{EntityKind, ServiceError};
use crate::store::AirportStore;

const CODE_LEN: usize = 3;

/// Plain airport CRUD. Lookups return the airport with its airlines loaded.
pub struct AirportService<S: AirportStore> {
    store: Arc<S>,
}

impl<S: AirportStore> AirportService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub async fn find_all(&self) -> Result<Vec<Airport>, ServiceError> {
        self.store.list_airports(true).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Airport, ServiceError> {
        self.store
            .find_airport(id, true)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Airport))
    }

    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: AirportInput) -> Result<Airport, ServiceError> {
        check_input(&input)?;
        let created = self.store.save_airport(&Airport::from_input(Uuid::new_v4(), input)).await?;
        info!(airport_id = %created.id, code = %created.code, "airport_created");
        Ok(created)
    }

    /// Replaces scalar fields; the airline set is left as is.
    #[instrument(skip(self, input), fields(airport_id = %id))]
    pub async fn update(&self, id: Uuid, input: AirportInput) -> Result<Airport, ServiceError> {
        if self.store.find_airport(id, false).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Airport));
        }
        check_input(&input)?;
        self.store.save_airport(&Airport::from_input(id, input)).await?;
        info!(airport_id = %id, "airport_updated");
        self.find_one(id).await
    }

    #[instrument(skip(self), fields(airport_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.find_airport(id, false).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Airport));
        }
        self.store.remove_airport(id).await?;
        info!(airport_id = %id, "airport_deleted");
        Ok(())
    }
}

fn check_input(input: &AirportInput) -> Result<(), ServiceError> {
    models::airport::validate_fields(&input.name, &input.code, &input.country, &input.city)?;
    if input.code.chars().count() != CODE_LEN {
        return Err(ServiceError::PreconditionFailed("the airport code must have exactly three characters".into()));
    }
    Ok(())
}
