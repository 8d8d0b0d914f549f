#![cfg(test)]
use chrono::NaiveDate;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use models::db::connect_with_config;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::domain::{Airline, AirlineInput, Airport, AirportInput};

/// Fresh in-memory database with the schema applied; tests never share state.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_with_config(&DatabaseConfig::with_url("sqlite::memory:")).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn airline_input(name: &str) -> AirlineInput {
    AirlineInput {
        name: name.to_string(),
        description: format!("{name} operates scheduled passenger flights"),
        founded_on: NaiveDate::from_ymd_opt(1924, 5, 30).unwrap(),
        website: format!("https://www.{}.example.com", name.to_lowercase()),
    }
}

pub fn airport_input(code: &str) -> AirportInput {
    AirportInput {
        name: code.to_string(),
        code: code.to_string(),
        country: "USA".to_string(),
        city: "Atlanta".to_string(),
    }
}

pub fn airline_fixture(name: &str) -> Airline {
    Airline::from_input(Uuid::new_v4(), airline_input(name))
}

pub fn airport_fixture(code: &str) -> Airport {
    Airport::from_input(Uuid::new_v4(), airport_input(code))
}
