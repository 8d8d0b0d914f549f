use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::store::SeaOrmStore;
use service::{AirlineService, AirportService, AssociationService};

/// Shared handler state: the three services over one SeaORM store.
#[derive(Clone)]
pub struct ServerState {
    pub airlines: Arc<AirlineService<SeaOrmStore>>,
    pub airports: Arc<AirportService<SeaOrmStore>>,
    pub associations: Arc<AssociationService<SeaOrmStore>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let store = Arc::new(SeaOrmStore::new(db));
        Self {
            airlines: Arc::new(AirlineService::new(Arc::clone(&store))),
            airports: Arc::new(AirportService::new(Arc::clone(&store))),
            associations: Arc::new(AssociationService::new(store)),
        }
    }
}
