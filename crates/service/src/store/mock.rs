//! In-memory store for tests and doc examples.
//!
//! A transaction works on a snapshot and records its own changes. Commit
//! replays them onto the parent's current state, so writes the parent
//! received after `begin` survive, and a change that no longer applies
//! fails the commit without touching the parent. An abandoned transaction
//! leaves nothing behind. Every persisted change is counted, see
//! [`MockStore::writes`].

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{sort_airlines, sort_airports, Airline, Airport};
use crate::errors::ServiceError;
use crate::store::{AirlineStore, AirportStore, StoreTransaction, TransactionalStore};

#[derive(Debug, Clone, Default)]
struct MockState {
    airlines: BTreeMap<Uuid, Airline>,
    airports: BTreeMap<Uuid, Airport>,
    // (airline_id, airport_id)
    links: BTreeSet<(Uuid, Uuid)>,
}

#[derive(Debug, Clone)]
enum Change {
    SaveAirline(Airline),
    SaveAirport(Airport),
    Links(Uuid, BTreeSet<Uuid>),
    RemoveAirline(Uuid),
    RemoveAirport(Uuid),
}

impl MockState {
    fn airline(&self, id: Uuid, load_with_associations: bool) -> Option<Airline> {
        let mut found = self.airlines.get(&id)?.clone();
        if load_with_associations {
            found.airports = self
                .links
                .iter()
                .filter(|(airline_id, _)| *airline_id == id)
                .filter_map(|(_, airport_id)| self.airports.get(airport_id).cloned())
                .collect();
            sort_airports(&mut found.airports);
        }
        Some(found)
    }

    fn airport(&self, id: Uuid, load_with_associations: bool) -> Option<Airport> {
        let mut found = self.airports.get(&id)?.clone();
        if load_with_associations {
            found.airlines = self
                .links
                .iter()
                .filter(|(_, airport_id)| *airport_id == id)
                .filter_map(|(airline_id, _)| self.airlines.get(airline_id).cloned())
                .collect();
            sort_airlines(&mut found.airlines);
        }
        Some(found)
    }

    /// Checks run before anything is modified.
    fn apply(&mut self, change: &Change) -> Result<(), ServiceError> {
        match change {
            Change::SaveAirline(airline) => {
                self.airlines.insert(airline.id, airline.clone());
            }
            Change::SaveAirport(airport) => {
                self.airports.insert(airport.id, airport.clone());
            }
            Change::Links(airline_id, airport_ids) => {
                if !self.airlines.contains_key(airline_id) {
                    return Err(ServiceError::Db(format!("foreign key violation: airline {airline_id}")));
                }
                if let Some(missing) = airport_ids.iter().find(|id| !self.airports.contains_key(id)) {
                    return Err(ServiceError::Db(format!("foreign key violation: airport {missing}")));
                }
                self.links.retain(|(a, _)| a != airline_id);
                self.links.extend(airport_ids.iter().map(|p| (*airline_id, *p)));
            }
            Change::RemoveAirline(id) => {
                self.links.retain(|(a, _)| a != id);
                self.airlines.remove(id);
            }
            Change::RemoveAirport(id) => {
                self.links.retain(|(_, p)| p != id);
                self.airports.remove(id);
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
    // set for transaction handles: where the changes go on commit
    parent: Option<Box<MockStore>>,
    journal: Arc<Mutex<Vec<Change>>>,
    writes: Arc<AtomicUsize>,
    unavailable: Arc<AtomicBool>,
}

fn poisoned<T>(_: T) -> ServiceError { ServiceError::Db("mock state poisoned".into()) }

impl MockStore {
    /// Number of persisted writes so far, transactions included. Rejected
    /// writes are not counted.
    pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

    pub fn reset_writes(&self) { self.writes.store(0, Ordering::SeqCst) }

    /// Make every subsequent call fail like an unreachable database.
    pub fn set_unavailable(&self, unavailable: bool) { self.unavailable.store(unavailable, Ordering::SeqCst) }

    fn lock(&self) -> Result<MutexGuard<'_, MockState>, ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ServiceError::Db("store unavailable".into()));
        }
        self.state.lock().map_err(poisoned)
    }

    fn write(&self, change: Change) -> Result<(), ServiceError> {
        self.lock()?.apply(&change)?;
        if self.parent.is_some() {
            self.journal.lock().map_err(poisoned)?.push(change);
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Apply committed changes all-or-nothing on top of the current state.
    fn merge(&self, changes: Vec<Change>) -> Result<(), ServiceError> {
        let mut state = self.lock()?;
        let mut staged = state.clone();
        for change in &changes {
            staged.apply(change)?;
        }
        *state = staged;
        if self.parent.is_some() {
            self.journal.lock().map_err(poisoned)?.extend(changes);
        }
        Ok(())
    }
}

#[async_trait]
impl AirlineStore for MockStore {
    async fn find_airline(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airline>, ServiceError> {
        Ok(self.lock()?.airline(id, load_with_associations))
    }

    async fn list_airlines(&self, load_with_associations: bool) -> Result<Vec<Airline>, ServiceError> {
        let state = self.lock()?;
        let mut all: Vec<Airline> = state
            .airlines
            .keys()
            .filter_map(|id| state.airline(*id, load_with_associations))
            .collect();
        sort_airlines(&mut all);
        Ok(all)
    }

    async fn save_airline(&self, airline: &Airline) -> Result<Airline, ServiceError> {
        let stored = airline.without_relations();
        self.write(Change::SaveAirline(stored.clone()))?;
        Ok(stored)
    }

    async fn save_airline_airports(&self, airline_id: Uuid, airport_ids: &BTreeSet<Uuid>) -> Result<(), ServiceError> {
        self.write(Change::Links(airline_id, airport_ids.clone()))
    }

    async fn remove_airline(&self, id: Uuid) -> Result<(), ServiceError> {
        self.write(Change::RemoveAirline(id))
    }
}

#[async_trait]
impl AirportStore for MockStore {
    async fn find_airport(&self, id: Uuid, load_with_associations: bool) -> Result<Option<Airport>, ServiceError> {
        Ok(self.lock()?.airport(id, load_with_associations))
    }

    async fn list_airports(&self, load_with_associations: bool) -> Result<Vec<Airport>, ServiceError> {
        let state = self.lock()?;
        let mut all: Vec<Airport> = state
            .airports
            .keys()
            .filter_map(|id| state.airport(*id, load_with_associations))
            .collect();
        sort_airports(&mut all);
        Ok(all)
    }

    async fn save_airport(&self, airport: &Airport) -> Result<Airport, ServiceError> {
        let stored = airport.without_relations();
        self.write(Change::SaveAirport(stored.clone()))?;
        Ok(stored)
    }

    async fn remove_airport(&self, id: Uuid) -> Result<(), ServiceError> {
        self.write(Change::RemoveAirport(id))
    }
}

#[async_trait]
impl StoreTransaction for MockStore {
    async fn commit(self) -> Result<(), ServiceError> {
        let changes = std::mem::take(&mut *self.journal.lock().map_err(poisoned)?);
        match &self.parent {
            Some(parent) => parent.merge(changes),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TransactionalStore for MockStore {
    type Tx = MockStore;

    async fn begin(&self) -> Result<Self::Tx, ServiceError> {
        let snapshot = self.lock()?.clone();
        Ok(MockStore {
            state: Arc::new(Mutex::new(snapshot)),
            parent: Some(Box::new(self.clone())),
            journal: Arc::new(Mutex::new(Vec::new())),
            writes: Arc::clone(&self.writes),
            unavailable: Arc::clone(&self.unavailable),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{airline_fixture, airport_fixture};

    #[tokio::test]
    async fn commit_publishes_changes() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        let atl = store.save_airport(&airport_fixture("ATL")).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.save_airline_airports(delta.id, &[atl.id].into_iter().collect()).await.unwrap();
        assert!(store.find_airline(delta.id, true).await.unwrap().unwrap().airports.is_empty());
        tx.commit().await.unwrap();

        let linked = store.find_airline(delta.id, true).await.unwrap().unwrap();
        assert_eq!(linked.airports, vec![atl]);
        assert_eq!(store.writes(), 3);
    }

    #[tokio::test]
    async fn dangling_links_are_rejected() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        let err = store
            .save_airline_airports(delta.id, &[Uuid::new_v4()].into_iter().collect())
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }

    #[tokio::test]
    async fn rejected_links_are_not_counted() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        store.reset_writes();

        let dangling: BTreeSet<Uuid> = [Uuid::new_v4()].into_iter().collect();
        assert!(store.save_airline_airports(delta.id, &dangling).await.is_err());
        assert_eq!(store.writes(), 0);
        assert!(store.find_airline(delta.id, true).await.unwrap().unwrap().airports.is_empty());
    }

    #[tokio::test]
    async fn commit_keeps_writes_made_after_begin() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        let atl = store.save_airport(&airport_fixture("ATL")).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.save_airline_airports(delta.id, &[atl.id].into_iter().collect()).await.unwrap();
        let united = store.save_airline(&airline_fixture("United")).await.unwrap();
        tx.commit().await.unwrap();

        assert!(store.find_airline(united.id, false).await.unwrap().is_some());
        let linked = store.find_airline(delta.id, true).await.unwrap().unwrap();
        assert_eq!(linked.airports, vec![atl]);
    }

    #[tokio::test]
    async fn conflicting_commit_leaves_parent_untouched() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        let atl = store.save_airport(&airport_fixture("ATL")).await.unwrap();
        let jfk = store.save_airport(&airport_fixture("JFK")).await.unwrap();

        let tx = store.begin().await.unwrap();
        tx.save_airline(&airline_fixture("United")).await.unwrap();
        tx.save_airline_airports(delta.id, &[atl.id, jfk.id].into_iter().collect()).await.unwrap();
        store.remove_airport(jfk.id).await.unwrap();

        let err = tx.commit().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(store.list_airlines(false).await.unwrap().len(), 1);
        assert!(store.find_airline(delta.id, true).await.unwrap().unwrap().airports.is_empty());
    }

    #[tokio::test]
    async fn nested_commit_reaches_the_root_through_the_outer_one() {
        let store = MockStore::default();
        let delta = store.save_airline(&airline_fixture("Delta")).await.unwrap();
        let atl = store.save_airport(&airport_fixture("ATL")).await.unwrap();

        let outer = store.begin().await.unwrap();
        let inner = outer.begin().await.unwrap();
        inner.save_airline_airports(delta.id, &[atl.id].into_iter().collect()).await.unwrap();
        inner.commit().await.unwrap();
        assert!(store.find_airline(delta.id, true).await.unwrap().unwrap().airports.is_empty());

        outer.commit().await.unwrap();
        assert_eq!(store.find_airline(delta.id, true).await.unwrap().unwrap().airports, vec![atl]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MockStore::default();
        store.set_unavailable(true);
        let err = store.find_airline(Uuid::new_v4(), false).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
