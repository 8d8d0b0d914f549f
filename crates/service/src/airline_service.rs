use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::{Airline, AirlineInput};
use crate::errors::{EntityKind, ServiceError};
use crate::store::AirlineStore;

/// Plain airline CRUD. Lookups return the airline with its airports loaded.
pub struct AirlineService<S: AirlineStore> {
    store: Arc<S>,
}

impl<S: AirlineStore> AirlineService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    pub async fn find_all(&self) -> Result<Vec<Airline>, ServiceError> {
        self.store.list_airlines(true).await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Airline, ServiceError> {
        self.store
            .find_airline(id, true)
            .await?
            .ok_or(ServiceError::not_found(EntityKind::Airline))
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: AirlineInput) -> Result<Airline, ServiceError> {
        check_input(&input, today())?;
        let created = self.store.save_airline(&Airline::from_input(Uuid::new_v4(), input)).await?;
        info!(airline_id = %created.id, "airline_created");
        Ok(created)
    }

    /// Replaces scalar fields; the airport set is left as is.
    #[instrument(skip(self, input), fields(airline_id = %id))]
    pub async fn update(&self, id: Uuid, input: AirlineInput) -> Result<Airline, ServiceError> {
        if self.store.find_airline(id, false).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Airline));
        }
        check_input(&input, today())?;
        self.store.save_airline(&Airline::from_input(id, input)).await?;
        info!(airline_id = %id, "airline_updated");
        self.find_one(id).await
    }

    #[instrument(skip(self), fields(airline_id = %id))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        if self.store.find_airline(id, false).await?.is_none() {
            return Err(ServiceError::not_found(EntityKind::Airline));
        }
        self.store.remove_airline(id).await?;
        info!(airline_id = %id, "airline_deleted");
        Ok(())
    }
}

fn today() -> NaiveDate { Utc::now().date_naive() }

fn check_input(input: &AirlineInput, today: NaiveDate) -> Result<(), ServiceError> {
    models::airline::validate_fields(&input.name, &input.description, &input.website)?;
    if input.founded_on > today {
        return Err(ServiceError::PreconditionFailed("the founding date must be in the past".into()));
    }
    Ok(())
}
