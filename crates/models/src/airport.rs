use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{airline, airline_airport, errors, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "airport")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    AirlineAirport,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::AirlineAirport => Entity::has_many(airline_airport::Entity).into(),
        }
    }
}

impl Related<airline_airport::Entity> for Entity {
    fn to() -> RelationDef { Relation::AirlineAirport.def() }
}

impl Related<airline::Entity> for Entity {
    fn to() -> RelationDef { airline_airport::Relation::Airline.def() }
    fn via() -> Option<RelationDef> { Some(airline_airport::Relation::Airport.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Code length is a business rule checked by the service layer, not here.
pub fn validate_fields(name: &str, code: &str, country: &str, city: &str) -> Result<(), errors::ModelError> {
    validate::require_non_empty("name", name)?;
    validate::require_non_empty("code", code)?;
    validate::require_non_empty("country", country)?;
    validate::require_non_empty("city", city)
}

pub async fn upsert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, errors::ModelError> {
    let exists = Entity::find_by_id(model.id).one(db).await?.is_some();
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        code: Set(model.code),
        country: Set(model.country),
        city: Set(model.city),
    };
    let saved = if exists { am.update(db).await? } else { am.insert(db).await? };
    Ok(saved)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn airlines_of<C: ConnectionTrait>(db: &C, model: &Model) -> Result<Vec<airline::Model>, errors::ModelError> {
    Ok(model
        .find_related(airline::Entity)
        .order_by_asc(airline::Column::Name)
        .order_by_asc(airline::Column::Id)
        .all(db)
        .await?)
}

pub async fn list_with_airlines<C: ConnectionTrait>(db: &C) -> Result<Vec<(Model, Vec<airline::Model>)>, errors::ModelError> {
    Ok(Entity::find()
        .find_with_related(airline::Entity)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
