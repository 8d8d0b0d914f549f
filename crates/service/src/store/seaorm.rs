use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::debug;
use uuid::Uuid;

use models::{airline, airline_airport, airport};

use crate::domain::{sort_airlines, sort_airports, Airline, Airport};
use crate::errors::ServiceError;
use crate::store::{AirlineStore, AirportStore, StoreTransaction, TransactionalStore};

/// SeaORM-backed store. `C` is a pooled connection or an open transaction.
#[derive(Clone)]
pub struct SeaOrmStore<C = DatabaseConnection> {
    pub db: C,
}

impl<C> SeaOrmStore<C> {
    pub fn new(db: C) -> Self { Self { db } }
}

fn db_err(e: sea_orm::DbErr) -> ServiceError { ServiceError::Db(e.to_string()) }

#[async_trait]
impl<C> AirlineStore for SeaOrmStore<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn find_airline(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airline>, ServiceError> {
        let Some(model) = airline::find(&self.db, id).await? else { return Ok(None) };
        let airports = if load_with_associations {
            airline::airports_of(&self.db, &model).await?
        } else {
            Vec::new()
        };
        let mut found = Airline::from(model);
        found.airports = airports.into_iter().map(Airport::from).collect();
        sort_airports(&mut found.airports);
        Ok(Some(found))
    }

    async fn list_airlines(&self, load_with_associations: bool) -> Result<Vec<Airline>, ServiceError> {
        if !load_with_associations {
            return Ok(airline::list(&self.db).await?.into_iter().map(Airline::from).collect());
        }
        let rows = airline::list_with_airports(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|(model, airports)| {
                let mut a = Airline::from(model);
                a.airports = airports.into_iter().map(Airport::from).collect();
                sort_airports(&mut a.airports);
                a
            })
            .collect())
    }

    async fn save_airline(&self, airline: &Airline) -> Result<Airline, ServiceError> {
        let saved = airline::upsert(&self.db, airline.into()).await?;
        Ok(Airline::from(saved))
    }

    async fn save_airline_airports(&self, airline_id: Uuid, airport_ids: &BTreeSet<Uuid>) -> Result<(), ServiceError> {
        airline_airport::replace_for_airline(&self.db, airline_id, airport_ids).await?;
        Ok(())
    }

    async fn remove_airline(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let unlinked = airline_airport::unlink_airline(&txn, id).await?;
        airline::delete(&txn, id).await?;
        txn.commit().await.map_err(db_err)?;
        debug!(airline_id = %id, unlinked, "airline removed");
        Ok(())
    }
}

#[async_trait]
impl<C> AirportStore for SeaOrmStore<C>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    async fn find_airport(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airport>, ServiceError> {
        let Some(model) = airport::find(&self.db, id).await? else { return Ok(None) };
        let airlines = if load_with_associations {
            airport::airlines_of(&self.db, &model).await?
        } else {
            Vec::new()
        };
        let mut found = Airport::from(model);
        found.airlines = airlines.into_iter().map(Airline::from).collect();
        sort_airlines(&mut found.airlines);
        Ok(Some(found))
    }

    async fn list_airports(&self, load_with_associations: bool) -> Result<Vec<Airport>, ServiceError> {
        if !load_with_associations {
            return Ok(airport::list(&self.db).await?.into_iter().map(Airport::from).collect());
        }
        let rows = airport::list_with_airlines(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|(model, airlines)| {
                let mut a = Airport::from(model);
                a.airlines = airlines.into_iter().map(Airline::from).collect();
                sort_airlines(&mut a.airlines);
                a
            })
            .collect())
    }

    async fn save_airport(&self, airport: &Airport) -> Result<Airport, ServiceError> {
        let saved = airport::upsert(&self.db, airport.into()).await?;
        Ok(Airport::from(saved))
    }

    async fn remove_airport(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let unlinked = airline_airport::unlink_airport(&txn, id).await?;
        airport::delete(&txn, id).await?;
        txn.commit().await.map_err(db_err)?;
        debug!(airport_id = %id, unlinked, "airport removed");
        Ok(())
    }
}

#[async_trait]
impl StoreTransaction for SeaOrmStore<DatabaseTransaction> {
    async fn commit(self) -> Result<(), ServiceError> {
        self.db.commit().await.map_err(db_err)
    }
}

#[async_trait]
impl TransactionalStore for SeaOrmStore<DatabaseConnection> {
    type Tx = SeaOrmStore<DatabaseTransaction>;

    async fn begin(&self) -> Result<Self::Tx, ServiceError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        Ok(SeaOrmStore::new(txn))
    }
}
