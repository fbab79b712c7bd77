//! Persistence seam.
//!
//! The editor never talks to storage. It queues [`Commit`]s, each replacing
//! one sub-object of the aggregate, and the host writes them to an
//! [`EventStore`] without the editor waiting on the result.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{FloorPlan, Table, Venue, Zone};

/// A whole-sub-object replacement of one event's floor plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Commit {
    Venue(Venue),
    Tables(Vec<Table>),
    Zones(Vec<Zone>),
}

impl Commit {
    pub fn kind(&self) -> &'static str {
        match self {
            Commit::Venue(_) => "venue",
            Commit::Tables(_) => "tables",
            Commit::Zones(_) => "zones",
        }
    }
}

impl FloorPlan {
    /// Replace the sub-object named by `commit`.
    pub fn apply_commit(&mut self, commit: &Commit) {
        match commit {
            Commit::Venue(venue) => self.venue = venue.clone(),
            Commit::Tables(tables) => self.tables = tables.clone(),
            Commit::Zones(zones) => self.zones = zones.clone(),
        }
    }
}

/// Durable home of floor plans, keyed by event id. Implementations must make
/// each `commit` atomic: readers see either the old or the new sub-object.
pub trait EventStore {
    fn load(&self, event_id: &str) -> Result<Option<FloorPlan>, StoreError>;

    fn commit(&self, event_id: &str, commit: &Commit) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;

    #[test]
    fn test_commit_replaces_one_sub_object() {
        let mut plan = FloorPlan::new("e1", "Show", Venue::new(40.0, 30.0));
        plan.zones.push(Zone {
            id: 1,
            name: "Front".into(),
            color: "#f00".into(),
            price: 10.0,
        });

        let tables = vec![Table::new(1, Point::new(2.0, 2.0))];
        plan.apply_commit(&Commit::Tables(tables.clone()));

        assert_eq!(plan.tables, tables);
        assert_eq!(plan.zones.len(), 1);
        assert_eq!(plan.venue.width, 40.0);

        plan.apply_commit(&Commit::Venue(Venue::new(60.0, 30.0)));
        assert_eq!(plan.venue.width, 60.0);
        assert_eq!(plan.tables, tables);
    }

    #[test]
    fn test_commit_wire_format() {
        let json = serde_json::to_value(Commit::Zones(Vec::new())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "zones", "value": []}));
    }
}
