use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use floorplan_shared::models::{FloorPlan, TableStatus};
use floorplan_shared::store::{Commit, EventStore};
use floorplan_shared::StoreError;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};

const EVENTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("events");

/// What is stored per event id: the floor plan plus bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default)]
    pub plan: FloorPlan,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl EventRecord {
    pub fn new(plan: FloorPlan) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        EventRecord {
            plan,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

pub struct Storage {
    db: Database,
    path: PathBuf,
}

impl Storage {
    pub fn open(path: &Path) -> Result<Arc<Self>, StoreError> {
        let db = Database::create(path).map_err(StoreError::backend)?;

        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        {
            write_txn
                .open_table(EVENTS_TABLE)
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;

        Ok(Arc::new(Storage {
            db,
            path: path.to_path_buf(),
        }))
    }

    /// Insert a new event. Fails if the id is already taken.
    pub fn create_event(&self, record: &EventRecord) -> Result<(), StoreError> {
        let id = record.plan.event_id.as_str();
        let json = serde_json::to_vec(record)?;

        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = write_txn
                .open_table(EVENTS_TABLE)
                .map_err(StoreError::backend)?;
            if table.get(id).map_err(StoreError::backend)?.is_some() {
                return Err(StoreError::Backend(format!("event {id} already exists")));
            }
            table
                .insert(id, json.as_slice())
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        tracing::info!(event_id = id, "event created");
        Ok(())
    }

    pub fn get_event(&self, id: &str) -> Result<Option<EventRecord>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn
            .open_table(EVENTS_TABLE)
            .map_err(StoreError::backend)?;

        match table.get(id).map_err(StoreError::backend)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    pub fn delete_event(&self, id: &str) -> Result<bool, StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        let removed = {
            let mut table = write_txn
                .open_table(EVENTS_TABLE)
                .map_err(StoreError::backend)?;
            let result = table.remove(id).map_err(StoreError::backend)?;
            result.is_some()
        };
        write_txn.commit().map_err(StoreError::backend)?;
        if removed {
            tracing::info!(event_id = id, "event deleted");
        }
        Ok(removed)
    }

    pub fn count_events(&self) -> Result<u64, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn
            .open_table(EVENTS_TABLE)
            .map_err(StoreError::backend)?;
        table.len().map_err(StoreError::backend)
    }

    pub fn db_size_bytes(&self) -> Result<u64, StoreError> {
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(StoreError::backend)
    }

    /// Number of tables in each status across every event.
    pub fn table_status_counts(&self) -> Result<BTreeMap<String, u64>, StoreError> {
        let read_txn = self.db.begin_read().map_err(StoreError::backend)?;
        let table = read_txn
            .open_table(EVENTS_TABLE)
            .map_err(StoreError::backend)?;

        let mut counts: BTreeMap<String, u64> = TableStatus::ALL
            .iter()
            .map(|s| (s.as_str().to_string(), 0))
            .collect();
        for result in table.iter().map_err(StoreError::backend)? {
            let (_key, value) = result.map_err(StoreError::backend)?;
            let record: EventRecord = serde_json::from_slice(value.value())?;
            for t in &record.plan.tables {
                *counts.entry(t.status.as_str().to_string()).or_default() += 1;
            }
        }
        Ok(counts)
    }
}

impl EventStore for Storage {
    fn load(&self, event_id: &str) -> Result<Option<FloorPlan>, StoreError> {
        Ok(self.get_event(event_id)?.map(|record| record.plan))
    }

    /// Read-modify-write inside one write transaction, so a concurrent
    /// reader sees either the old or the new sub-object.
    fn commit(&self, event_id: &str, commit: &Commit) -> Result<(), StoreError> {
        let write_txn = self.db.begin_write().map_err(StoreError::backend)?;
        {
            let mut table = write_txn
                .open_table(EVENTS_TABLE)
                .map_err(StoreError::backend)?;
            let existing = table
                .get(event_id)
                .map_err(StoreError::backend)?
                .map(|v| v.value().to_vec())
                .ok_or_else(|| StoreError::NotFound(event_id.to_string()))?;

            let mut record: EventRecord = serde_json::from_slice(&existing)?;
            record.plan.apply_commit(commit);
            record.updated_at = chrono::Utc::now().to_rfc3339();
            let json = serde_json::to_vec(&record)?;
            table
                .insert(event_id, json.as_slice())
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;
        tracing::info!(event_id, kind = commit.kind(), "floor plan committed");
        Ok(())
    }
}
