use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::{airline_airport, airport, errors, validate};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "airline")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub founded_on: Date,
    pub website: String,
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

/// Many-to-many through `airline_airport`.
impl Related<airport::Entity> for Entity {
    fn to() -> RelationDef { airline_airport::Relation::Airport.def() }
    fn via() -> Option<RelationDef> { Some(airline_airport::Relation::Airline.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_fields(name: &str, description: &str, website: &str) -> Result<(), errors::ModelError> {
    validate::require_non_empty("name", name)?;
    validate::require_non_empty("description", description)?;
    validate::require_http_url("website", website)
}

/// Insert or update by primary key. Relation rows are not touched.
pub async fn upsert<C: ConnectionTrait>(db: &C, model: Model) -> Result<Model, errors::ModelError> {
    let exists = Entity::find_by_id(model.id).one(db).await?.is_some();
    let am = ActiveModel {
        id: Set(model.id),
        name: Set(model.name),
        description: Set(model.description),
        founded_on: Set(model.founded_on),
        website: Set(model.website),
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

/// Airports linked to one airline.
pub async fn airports_of<C: ConnectionTrait>(db: &C, model: &Model) -> Result<Vec<airport::Model>, errors::ModelError> {
    Ok(model
        .find_related(airport::Entity)
        .order_by_asc(airport::Column::Name)
        .order_by_asc(airport::Column::Id)
        .all(db)
        .await?)
}

/// Every airline with its linked airports.
pub async fn list_with_airports<C: ConnectionTrait>(db: &C) -> Result<Vec<(Model, Vec<airport::Model>)>, errors::ModelError> {
    Ok(Entity::find()
        .find_with_related(airport::Entity)
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
