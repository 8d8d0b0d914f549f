use chrono::NaiveDate;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: Option<String>,
}

#[derive(ToSchema)]
pub struct AirlineInputDoc {
    pub name: String,
    pub description: String,
    /// ISO-8601 date, must not be in the future
    pub founded_on: NaiveDate,
    /// Absolute http(s) URL
    pub website: String,
}

#[derive(ToSchema)]
pub struct AirportInputDoc {
    pub name: String,
    /// Exactly three characters
    pub code: String,
    pub country: String,
    pub city: String,
}

#[derive(ToSchema)]
pub struct AirportRefDoc { pub id: Uuid }

#[derive(ToSchema)]
pub struct AirlineDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub founded_on: NaiveDate,
    pub website: String,
    pub airports: Vec<AirportSummaryDoc>,
}

#[derive(ToSchema)]
pub struct AirportDoc {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
    pub airlines: Vec<AirlineSummaryDoc>,
}

/// Airline nested inside an airport; its own relation is not loaded.
#[derive(ToSchema)]
pub struct AirlineSummaryDoc {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub founded_on: NaiveDate,
    pub website: String,
}

#[derive(ToSchema)]
pub struct AirportSummaryDoc {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub country: String,
    pub city: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::airlines::list,
        crate::routes::airlines::create,
        crate::routes::airlines::get,
        crate::routes::airlines::update,
        crate::routes::airlines::delete,
        crate::routes::airports::list,
        crate::routes::airports::create,
        crate::routes::airports::get,
        crate::routes::airports::update,
        crate::routes::airports::delete,
        crate::routes::associations::add,
        crate::routes::associations::list,
        crate::routes::associations::get,
        crate::routes::associations::replace,
        crate::routes::associations::remove,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorBody,
            AirlineInputDoc,
            AirportInputDoc,
            AirportRefDoc,
            AirlineDoc,
            AirportDoc,
            AirlineSummaryDoc,
            AirportSummaryDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "airlines"),
        (name = "airports"),
        (name = "associations")
    )
)]
pub struct ApiDoc;
