use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Airline with its associated airports.
/// `airports` is empty when the relation was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub founded_on: NaiveDate,
    pub website: String,
    #[serde(default)]
    pub airports: Vec<Airport>,
}

/// Airport with its associated airlines.
/// `airlines` is empty when the relation was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub airlines: Vec<Airline>,
}

/// Create/update payload for an airline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirlineInput {
    pub name: String,
    pub description: String,
    pub founded_on: NaiveDate,
    pub website: String,
}

/// Create/update payload for an airport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportInput {
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
}

/// Reference to a stored airport; only the id is used for resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirportRef {
    pub id: Uuid,
}

impl Airline {
    pub fn from_input(id: Uuid, input: AirlineInput) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            founded_on: input.founded_on,
            website: input.website,
            airports: Vec::new(),
        }
    }

    pub fn has_airport(&self, airport_id: Uuid) -> bool {
        self.airports.iter().any(|a| a.id == airport_id)
    }

    /// Copy without the loaded relation, for nesting inside the other side.
    pub fn without_relations(&self) -> Self {
        Self { airports: Vec::new(), ..self.clone() }
    }
}

impl Airport {
    pub fn from_input(id: Uuid, input: AirportInput) -> Self {
        Self {
            id,
            name: input.name,
            code: input.code,
            country: input.country,
            city: input.city,
            airlines: Vec::new(),
        }
    }

    pub fn without_relations(&self) -> Self {
        Self { airlines: Vec::new(), ..self.clone() }
    }
}

impl From<&Airport> for AirportRef {
    fn from(a: &Airport) -> Self { Self { id: a.id } }
}

impl From<models::airline::Model> for Airline {
    fn from(m: models::airline::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            founded_on: m.founded_on,
            website: m.website,
            airports: Vec::new(),
        }
    }
}

impl From<&Airline> for models::airline::Model {
    fn from(a: &Airline) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            description: a.description.clone(),
            founded_on: a.founded_on,
            website: a.website.clone(),
        }
    }
}

impl From<models::airport::Model> for Airport {
    fn from(m: models::airport::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            code: m.code,
            country: m.country,
            city: m.city,
            airlines: Vec::new(),
        }
    }
}

impl From<&Airport> for models::airport::Model {
    fn from(a: &Airport) -> Self {
        Self {
            id: a.id,
            name: a.name.clone(),
            code: a.code.clone(),
            country: a.country.clone(),
            city: a.city.clone(),
        }
    }
}

/// Stable ordering for relation members: name, then id.
pub(crate) fn sort_airports(airports: &mut [Airport]) {
    airports.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}

pub(crate) fn sort_airlines(airlines: &mut [Airline]) {
    airlines.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
}
