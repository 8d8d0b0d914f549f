//! Join table between `airline` and `airport`.
//! Both directions of the relation are read from these rows, so writing
//! here keeps the two sides consistent.
use std::collections::BTreeSet;

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{airline, airport, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "airline_airport")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub airline_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub airport_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Airline,
    Airport,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Airline => Entity::belongs_to(airline::Entity)
                .from(Column::AirlineId)
                .to(airline::Column::Id)
                .into(),
            Relation::Airport => Entity::belongs_to(airport::Entity)
                .from(Column::AirportId)
                .to(airport::Column::Id)
                .into(),
        }
    }
}

impl Related<airline::Entity> for Entity {
    fn to() -> RelationDef { Relation::Airline.def() }
}

impl Related<airport::Entity> for Entity {
    fn to() -> RelationDef { Relation::Airport.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn airport_ids_of<C: ConnectionTrait>(db: &C, airline_id: Uuid) -> Result<BTreeSet<Uuid>, errors::ModelError> {
    let rows = Entity::find()
        .filter(Column::AirlineId.eq(airline_id))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|r| r.airport_id).collect())
}

/// Make the airline's rows match `airport_ids` exactly, in one transaction.
/// Only the difference is written.
pub async fn replace_for_airline<C>(db: &C, airline_id: Uuid, airport_ids: &BTreeSet<Uuid>) -> Result<(), errors::ModelError>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let current = airport_ids_of(&txn, airline_id).await?;

    let stale: Vec<Uuid> = current.difference(airport_ids).copied().collect();
    if !stale.is_empty() {
        Entity::delete_many()
            .filter(Column::AirlineId.eq(airline_id))
            .filter(Column::AirportId.is_in(stale.clone()))
            .exec(&txn)
            .await?;
    }

    let missing: Vec<ActiveModel> = airport_ids
        .difference(&current)
        .map(|airport_id| ActiveModel { airline_id: Set(airline_id), airport_id: Set(*airport_id) })
        .collect();
    let inserted = missing.len();
    if !missing.is_empty() {
        Entity::insert_many(missing).exec_without_returning(&txn).await?;
    }

    txn.commit().await?;
    debug!(%airline_id, removed = stale.len(), inserted, "airline_airport rows replaced");
    Ok(())
}

pub async fn unlink_airline<C: ConnectionTrait>(db: &C, airline_id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::AirlineId.eq(airline_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}

pub async fn unlink_airport<C: ConnectionTrait>(db: &C, airport_id: Uuid) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_many()
        .filter(Column::AirportId.eq(airport_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
