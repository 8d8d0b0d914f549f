pub mod errors;
pub mod db;
pub mod validate;
pub mod airline;
pub mod airport;
pub mod airline_airport;

#[cfg(test)]
mod tests;
