//! Airline and airport association workflows.
//!
//! Every operation resolves the airline first and then, when one is given,
//! the airport, so an unknown airline wins over an unknown airport. The
//! airport lookup is global: membership in the airline's set is checked only
//! after the airport is known to exist. Mutations run in one store
//! transaction and issue a single association write after all checks pass.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Airline, Airport, AirportRef};
use crate::errors::{EntityKind, ServiceError};
use crate::store::{AirlineStore, AirportStore, StoreTransaction, TransactionalStore};

pub struct AssociationService<S: TransactionalStore> {
    store: Arc<S>,
}

async fn resolve_airline<T: AirlineStore + ?Sized>(store: &T, id: Uuid, load_with_associations: bool) -> Result<Airline, ServiceError> {
    store
        .find_airline(id, load_with_associations)
        .await?
        .ok_or(ServiceError::not_found(EntityKind::Airline))
}

async fn resolve_airport<T: AirportStore + ?Sized>(store: &T, id: Uuid) -> Result<Airport, ServiceError> {
    store
        .find_airport(id, false)
        .await?
        .ok_or(ServiceError::not_found(EntityKind::Airport))
}

fn member_ids(airline: &Airline) -> BTreeSet<Uuid> {
    airline.airports.iter().map(|a| a.id).collect()
}

impl<S: TransactionalStore> AssociationService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    /// Link an airport to an airline. Linking an existing member is a no-op
    /// apart from the write.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::AssociationService;
    /// use service::domain::{Airline, AirlineInput, Airport, AirportInput};
    /// use service::store::{mock::MockStore, AirlineStore, AirportStore};
    ///
    /// let store = Arc::new(MockStore::default());
    /// let delta = Airline::from_input(uuid::Uuid::new_v4(), AirlineInput {
    ///     name: "Delta".into(),
    ///     description: "Atlanta based carrier".into(),
    ///     founded_on: chrono::NaiveDate::from_ymd_opt(1924, 5, 30).unwrap(),
    ///     website: "https://www.delta.com".into(),
    /// });
    /// let atl = Airport::from_input(uuid::Uuid::new_v4(), AirportInput {
    ///     name: "Hartsfield-Jackson".into(),
    ///     code: "ATL".into(),
    ///     country: "USA".into(),
    ///     city: "Atlanta".into(),
    /// });
    /// tokio_test::block_on(store.save_airline(&delta)).unwrap();
    /// tokio_test::block_on(store.save_airport(&atl)).unwrap();
    ///
    /// let svc = AssociationService::new(store);
    /// let linked = tokio_test::block_on(svc.add_link(delta.id, atl.id)).unwrap();
    /// assert_eq!(linked.airports.len(), 1);
    /// assert_eq!(linked.airports[0].code, "ATL");
    /// ```
    #[instrument(skip(self), fields(%airline_id, %airport_id))]
    pub async fn add_link(&self, airline_id: Uuid, airport_id: Uuid) -> Result<Airline, ServiceError> {
        let tx = self.store.begin().await?;
        let airline = resolve_airline(&tx, airline_id, true).await?;
        resolve_airport(&tx, airport_id).await?;

        let mut ids = member_ids(&airline);
        if !ids.insert(airport_id) {
            debug!("airport already linked");
        }
        tx.save_airline_airports(airline_id, &ids).await?;
        let updated = resolve_airline(&tx, airline_id, true).await?;
        tx.commit().await?;

        info!(%airline_id, %airport_id, "airport_linked");
        Ok(updated)
    }

    /// Airports linked to the airline; empty when there are none.
    #[instrument(skip(self), fields(%airline_id))]
    pub async fn list_linked_airports(&self, airline_id: Uuid) -> Result<Vec<Airport>, ServiceError> {
        let airline = resolve_airline(self.store.as_ref(), airline_id, true).await?;
        Ok(airline.airports)
    }

    #[instrument(skip(self), fields(%airline_id, %airport_id))]
    pub async fn get_linked_airport(&self, airline_id: Uuid, airport_id: Uuid) -> Result<Airport, ServiceError> {
        let airline = resolve_airline(self.store.as_ref(), airline_id, true).await?;
        let airport = resolve_airport(self.store.as_ref(), airport_id).await?;
        if !airline.has_airport(airport.id) {
            return Err(ServiceError::NotAssociated);
        }
        Ok(airport)
    }

    /// Make the given airports the airline's exact set. All of them must
    /// exist; otherwise nothing is written.
    #[instrument(skip(self, airports), fields(%airline_id, count = airports.len()))]
    pub async fn replace_linked_airports(&self, airline_id: Uuid, airports: &[AirportRef]) -> Result<Airline, ServiceError> {
        let tx = self.store.begin().await?;
        resolve_airline(&tx, airline_id, false).await?;

        let mut ids = BTreeSet::new();
        for airport in airports {
            let resolved = resolve_airport(&tx, airport.id).await?;
            ids.insert(resolved.id);
        }
        tx.save_airline_airports(airline_id, &ids).await?;
        let updated = resolve_airline(&tx, airline_id, true).await?;
        tx.commit().await?;

        info!(%airline_id, linked = ids.len(), "airports_replaced");
        Ok(updated)
    }

    #[instrument(skip(self), fields(%airline_id, %airport_id))]
    pub async fn remove_link(&self, airline_id: Uuid, airport_id: Uuid) -> Result<(), ServiceError> {
        let tx = self.store.begin().await?;
        let airline = resolve_airline(&tx, airline_id, true).await?;
        resolve_airport(&tx, airport_id).await?;

        let mut ids = member_ids(&airline);
        if !ids.remove(&airport_id) {
            return Err(ServiceError::NotAssociated);
        }
        tx.save_airline_airports(airline_id, &ids).await?;
        tx.commit().await?;

        info!(%airline_id, %airport_id, "airport_unlinked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mock::MockStore;
    use crate::store::SeaOrmStore;
    use crate::test_support::{airline_fixture, airport_fixture, get_db};

    struct Fixture {
        store: Arc<MockStore>,
        svc: AssociationService<MockStore>,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(MockStore::default());
            Self { svc: AssociationService::new(Arc::clone(&store)), store }
        }

        async fn airline(&self, name: &str) -> Airline {
            self.store.save_airline(&airline_fixture(name)).await.unwrap()
        }

        async fn airport(&self, code: &str) -> Airport {
            self.store.save_airport(&airport_fixture(code)).await.unwrap()
        }
    }

    fn refs(airports: &[&Airport]) -> Vec<AirportRef> {
        airports.iter().map(|a| AirportRef::from(*a)).collect()
    }

    #[tokio::test]
    async fn add_then_get_returns_the_airport() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;

        let linked = f.svc.add_link(delta.id, atl.id).await.unwrap();
        assert_eq!(linked.airports, vec![atl.clone()]);
        assert_eq!(f.svc.get_linked_airport(delta.id, atl.id).await.unwrap(), atl);
    }

    #[tokio::test]
    async fn add_is_set_union() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;

        f.svc.add_link(delta.id, atl.id).await.unwrap();
        let again = f.svc.add_link(delta.id, atl.id).await.unwrap();
        assert_eq!(again.airports.len(), 1);
    }

    #[tokio::test]
    async fn add_reports_missing_side() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        f.store.reset_writes();

        let err = f.svc.add_link(delta.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airport)));

        let err = f.svc.add_link(Uuid::new_v4(), atl.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airline)));

        // airline is checked first
        let err = f.svc.add_link(Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airline)));

        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn list_on_unlinked_airline_is_empty() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        assert!(f.svc.list_linked_airports(delta.id).await.unwrap().is_empty());

        let err = f.svc.list_linked_airports(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.to_string(), "the airline with the given id was not found");
    }

    #[tokio::test]
    async fn get_distinguishes_unlinked_from_missing() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        let jfk = f.airport("JFK").await;
        f.svc.add_link(delta.id, atl.id).await.unwrap();

        let err = f.svc.get_linked_airport(delta.id, jfk.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotAssociated));

        let err = f.svc.get_linked_airport(delta.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airport)));

        let err = f.svc.get_linked_airport(Uuid::new_v4(), atl.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airline)));
    }

    #[tokio::test]
    async fn replace_sets_exact_membership() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        let jfk = f.airport("JFK").await;
        let lax = f.airport("LAX").await;
        f.svc.add_link(delta.id, atl.id).await.unwrap();

        let updated = f.svc.replace_linked_airports(delta.id, &refs(&[&jfk, &lax])).await.unwrap();
        let ids: BTreeSet<Uuid> = updated.airports.iter().map(|a| a.id).collect();
        assert_eq!(ids, [jfk.id, lax.id].into_iter().collect());

        let listed: BTreeSet<Uuid> = f.svc.list_linked_airports(delta.id).await.unwrap().iter().map(|a| a.id).collect();
        assert_eq!(listed, ids);
        // replaced airports still exist
        assert!(f.store.find_airport(atl.id, false).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn replace_collapses_duplicates_and_accepts_empty() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;

        let updated = f.svc.replace_linked_airports(delta.id, &refs(&[&atl, &atl])).await.unwrap();
        assert_eq!(updated.airports.len(), 1);

        let cleared = f.svc.replace_linked_airports(delta.id, &[]).await.unwrap();
        assert!(cleared.airports.is_empty());
    }

    #[tokio::test]
    async fn replace_with_unknown_airport_changes_nothing() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        let jfk = f.airport("JFK").await;
        f.svc.add_link(delta.id, atl.id).await.unwrap();
        f.store.reset_writes();

        let unknown = AirportRef { id: Uuid::new_v4() };
        let err = f
            .svc
            .replace_linked_airports(delta.id, &[AirportRef::from(&jfk), unknown])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airport)));
        assert_eq!(f.store.writes(), 0);

        let listed = f.svc.list_linked_airports(delta.id).await.unwrap();
        assert_eq!(listed, vec![atl]);
    }

    #[tokio::test]
    async fn replace_on_unknown_airline() {
        let f = Fixture::new();
        let atl = f.airport("ATL").await;
        let err = f.svc.replace_linked_airports(Uuid::new_v4(), &refs(&[&atl])).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airline)));
    }

    #[tokio::test]
    async fn remove_then_get_is_not_associated() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        f.svc.add_link(delta.id, atl.id).await.unwrap();

        f.svc.remove_link(delta.id, atl.id).await.unwrap();

        let err = f.svc.get_linked_airport(delta.id, atl.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotAssociated));
    }

    #[tokio::test]
    async fn remove_error_cases() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        f.store.reset_writes();

        let err = f.svc.remove_link(delta.id, atl.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotAssociated));

        let err = f.svc.remove_link(delta.id, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airport)));

        let err = f.svc.remove_link(Uuid::new_v4(), atl.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airline)));

        assert_eq!(f.store.writes(), 0);
    }

    #[tokio::test]
    async fn each_mutation_writes_once() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        let atl = f.airport("ATL").await;
        let jfk = f.airport("JFK").await;
        f.store.reset_writes();

        f.svc.add_link(delta.id, atl.id).await.unwrap();
        assert_eq!(f.store.writes(), 1);
        f.svc.replace_linked_airports(delta.id, &refs(&[&atl, &jfk])).await.unwrap();
        assert_eq!(f.store.writes(), 2);
        f.svc.remove_link(delta.id, jfk.id).await.unwrap();
        assert_eq!(f.store.writes(), 3);
        f.svc.list_linked_airports(delta.id).await.unwrap();
        f.svc.get_linked_airport(delta.id, atl.id).await.unwrap();
        assert_eq!(f.store.writes(), 3);
    }

    #[tokio::test]
    async fn infrastructure_failures_are_not_not_found() {
        let f = Fixture::new();
        let delta = f.airline("Delta").await;
        f.store.set_unavailable(true);

        let err = f.svc.list_linked_airports(delta.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert!(!err.is_business());
    }

    #[tokio::test]
    async fn delta_atl_round_trip_on_sqlite() -> Result<(), anyhow::Error> {
        let store = Arc::new(SeaOrmStore::new(get_db().await?));
        let delta = store.save_airline(&airline_fixture("Delta")).await?;
        let atl = store.save_airport(&airport_fixture("ATL")).await?;
        let svc = AssociationService::new(Arc::clone(&store));

        let linked = svc.add_link(delta.id, atl.id).await?;
        assert_eq!(linked.airports.len(), 1);

        let listed = svc.list_linked_airports(delta.id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "ATL");
        assert_eq!(svc.get_linked_airport(delta.id, atl.id).await?, atl);

        svc.remove_link(delta.id, atl.id).await?;
        assert!(svc.list_linked_airports(delta.id).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn failed_replace_keeps_rows_on_sqlite() -> Result<(), anyhow::Error> {
        let store = Arc::new(SeaOrmStore::new(get_db().await?));
        let delta = store.save_airline(&airline_fixture("Delta")).await?;
        let atl = store.save_airport(&airport_fixture("ATL")).await?;
        let jfk = store.save_airport(&airport_fixture("JFK")).await?;
        let svc = AssociationService::new(Arc::clone(&store));
        svc.add_link(delta.id, atl.id).await?;

        let err = svc
            .replace_linked_airports(delta.id, &[AirportRef::from(&jfk), AirportRef { id: Uuid::new_v4() }])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(EntityKind::Airport)));

        let listed = svc.list_linked_airports(delta.id).await?;
        assert_eq!(listed, vec![atl.clone()]);

        let replaced = svc.replace_linked_airports(delta.id, &[AirportRef::from(&jfk)]).await?;
        assert_eq!(replaced.airports, vec![jfk]);
        Ok(())
    }
}
