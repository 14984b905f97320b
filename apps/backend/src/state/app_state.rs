use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::services::allocator::{IdentifierAllocator, RandomAllocator};
use crate::services::distributions::DistributionService;

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent when the server runs without storage)
    db: Option<DatabaseConnection>,
    /// Identifier source for newly generated distributions
    allocator: Arc<dyn IdentifierAllocator>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, allocator: Arc<dyn IdentifierAllocator>) -> Self {
        Self {
            db: Some(db),
            allocator,
        }
    }

    pub fn new_without_db(allocator: Arc<dyn IdentifierAllocator>) -> Self {
        Self {
            db: None,
            allocator,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    pub fn distributions(&self) -> DistributionService {
        DistributionService::new(Arc::clone(&self.allocator))
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new_without_db(Arc::new(RandomAllocator))
    }
}
