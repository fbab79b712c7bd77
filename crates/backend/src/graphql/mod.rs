use std::sync::Arc;

use async_graphql::{Context, Enum, InputObject, Object, SimpleObject, ID};
use floorplan_shared::labeling::apply_labels;
use floorplan_shared::models::{
    self, validate_dimension, FloorPlan, Point, Rotation, TableStatus, DEFAULT_VENUE_HEIGHT_FT,
    DEFAULT_VENUE_WIDTH_FT,
};
use floorplan_shared::store::{Commit, EventStore};
use floorplan_shared::{EditorConfig, InputError, StoreError};

use crate::storage::{EventRecord, Storage};

#[derive(Enum, Copy, Clone, Eq, PartialEq)]
#[graphql(rename_items = "lowercase")]
pub enum GqlTableStatus {
    Available,
    Booked,
    Paid,
    Reserved,
    Occupied,
}

impl From<TableStatus> for GqlTableStatus {
    fn from(s: TableStatus) -> Self {
        match s {
            TableStatus::Available => GqlTableStatus::Available,
            TableStatus::Booked => GqlTableStatus::Booked,
            TableStatus::Paid => GqlTableStatus::Paid,
            TableStatus::Reserved => GqlTableStatus::Reserved,
            TableStatus::Occupied => GqlTableStatus::Occupied,
        }
    }
}

impl From<GqlTableStatus> for TableStatus {
    fn from(s: GqlTableStatus) -> Self {
        match s {
            GqlTableStatus::Available => TableStatus::Available,
            GqlTableStatus::Booked => TableStatus::Booked,
            GqlTableStatus::Paid => TableStatus::Paid,
            GqlTableStatus::Reserved => TableStatus::Reserved,
            GqlTableStatus::Occupied => TableStatus::Occupied,
        }
    }
}

// GraphQL output types

#[derive(SimpleObject, Clone)]
pub struct GqlPoint {
    pub x: f64,
    pub y: f64,
}

impl From<Point> for GqlPoint {
    fn from(p: Point) -> Self {
        GqlPoint { x: p.x, y: p.y }
    }
}

#[derive(SimpleObject)]
pub struct GqlVenue {
    pub width: f64,
    pub height: f64,
    pub boundary: Vec<GqlPoint>,
}

#[derive(SimpleObject)]
pub struct GqlTable {
    pub id: u64,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: u16,
    pub status: GqlTableStatus,
    pub vendor_id: Option<String>,
    pub zone_id: Option<u64>,
}

#[derive(SimpleObject)]
pub struct GqlZone {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub price: f64,
}

#[derive(SimpleObject)]
pub struct GqlFloorPlan {
    pub event_id: ID,
    pub name: String,
    pub venue: GqlVenue,
    pub tables: Vec<GqlTable>,
    pub zones: Vec<GqlZone>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<EventRecord> for GqlFloorPlan {
    fn from(record: EventRecord) -> Self {
        let FloorPlan {
            event_id,
            name,
            venue,
            tables,
            zones,
        } = record.plan;
        GqlFloorPlan {
            event_id: ID(event_id),
            name,
            venue: GqlVenue {
                width: venue.width,
                height: venue.height,
                boundary: venue.boundary.into_iter().map(GqlPoint::from).collect(),
            },
            tables: tables
                .into_iter()
                .map(|t| GqlTable {
                    id: t.id,
                    label: t.label,
                    x: t.x,
                    y: t.y,
                    width: t.width,
                    height: t.height,
                    rotation: t.rotation.degrees(),
                    status: t.status.into(),
                    vendor_id: t.vendor_id,
                    zone_id: t.zone_id,
                })
                .collect(),
            zones: zones
                .into_iter()
                .map(|z| GqlZone {
                    id: z.id,
                    name: z.name,
                    color: z.color,
                    price: z.price,
                })
                .collect(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(SimpleObject)]
pub struct GqlStatusCount {
    pub status: String,
    pub count: u64,
}

#[derive(SimpleObject)]
pub struct GqlStats {
    pub total_events: u64,
    pub db_size_bytes: u64,
    pub tables_by_status: Vec<GqlStatusCount>,
}

// Input types

#[derive(InputObject)]
pub struct PointInput {
    pub x: f64,
    pub y: f64,
}

#[derive(InputObject)]
pub struct VenueInput {
    pub width: f64,
    pub height: f64,
    pub boundary: Option<Vec<PointInput>>,
}

impl VenueInput {
    fn into_venue(self) -> Result<models::Venue, InputError> {
        let boundary: Vec<Point> = self
            .boundary
            .unwrap_or_default()
            .into_iter()
            .map(|p| Point::new(p.x, p.y))
            .collect();
        Ok(models::Venue {
            width: validate_dimension(self.width)?,
            height: validate_dimension(self.height)?,
            boundary,
        })
    }
}

#[derive(InputObject)]
pub struct TableInput {
    pub id: u64,
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: Option<u16>,
    pub status: Option<GqlTableStatus>,
    pub vendor_id: Option<String>,
    pub zone_id: Option<u64>,
}

impl TableInput {
    fn into_table(self) -> Result<models::Table, InputError> {
        let mut table = models::Table::new(self.id, Point::new(self.x, self.y));
        table.width = validate_dimension(self.width)?;
        table.height = validate_dimension(self.height)?;
        table.rotation = Rotation::try_from(self.rotation.unwrap_or(0))?;
        table.status = self.status.map(TableStatus::from).unwrap_or_default();
        table.vendor_id = self.vendor_id;
        table.zone_id = self.zone_id;
        table.label = self.label.unwrap_or_default();
        Ok(table)
    }
}

#[derive(InputObject)]
pub struct ZoneInput {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub price: Option<f64>,
}

fn gql_err(err: impl std::fmt::Display) -> async_graphql::Error {
    async_graphql::Error::new(err.to_string())
}

fn storage<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<Storage>> {
    ctx.data::<Arc<Storage>>()
}

/// Event ids are UUIDs; anything else cannot name a stored event.
fn parse_event_id(id: &ID) -> async_graphql::Result<String> {
    uuid::Uuid::parse_str(id.as_str())
        .map(|u| u.to_string())
        .map_err(|_| async_graphql::Error::new(format!("Invalid event id: {}", id.as_str())))
}

/// Apply one commit and return the stored result.
fn commit_and_reload(
    storage: &Storage,
    event_id: &str,
    commit: Commit,
) -> async_graphql::Result<GqlFloorPlan> {
    storage.commit(event_id, &commit).map_err(|e| {
        if !matches!(e, StoreError::NotFound(_)) {
            tracing::error!(event_id, kind = commit.kind(), error = %e, "commit failed");
        }
        gql_err(e)
    })?;
    storage
        .get_event(event_id)
        .map_err(gql_err)?
        .map(GqlFloorPlan::from)
        .ok_or_else(|| gql_err(StoreError::NotFound(event_id.to_string())))
}

// Query root

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn floor_plan(
        &self,
        ctx: &Context<'_>,
        event_id: ID,
    ) -> async_graphql::Result<Option<GqlFloorPlan>> {
        let event_id = parse_event_id(&event_id)?;
        let record = storage(ctx)?.get_event(&event_id).map_err(gql_err)?;
        Ok(record.map(GqlFloorPlan::from))
    }

    async fn stats(&self, ctx: &Context<'_>) -> async_graphql::Result<GqlStats> {
        let storage = storage(ctx)?;
        Ok(GqlStats {
            total_events: storage.count_events().map_err(gql_err)?,
            db_size_bytes: storage.db_size_bytes().map_err(gql_err)?,
            tables_by_status: storage
                .table_status_counts()
                .map_err(gql_err)?
                .into_iter()
                .map(|(status, count)| GqlStatusCount { status, count })
                .collect(),
        })
    }
}

// Mutation root

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_event(
        &self,
        ctx: &Context<'_>,
        name: String,
        width: Option<f64>,
        height: Option<f64>,
    ) -> async_graphql::Result<GqlFloorPlan> {
        let width = validate_dimension(width.unwrap_or(DEFAULT_VENUE_WIDTH_FT)).map_err(gql_err)?;
        let height =
            validate_dimension(height.unwrap_or(DEFAULT_VENUE_HEIGHT_FT)).map_err(gql_err)?;
        let plan = FloorPlan::new(
            models::new_event_id(),
            name.trim(),
            models::Venue::new(width, height),
        );
        let record = EventRecord::new(plan);
        storage(ctx)?.create_event(&record).map_err(gql_err)?;
        Ok(GqlFloorPlan::from(record))
    }

    async fn replace_venue(
        &self,
        ctx: &Context<'_>,
        event_id: ID,
        venue: VenueInput,
    ) -> async_graphql::Result<GqlFloorPlan> {
        let event_id = parse_event_id(&event_id)?;
        let venue = venue.into_venue().map_err(gql_err)?;
        commit_and_reload(storage(ctx)?, &event_id, Commit::Venue(venue))
    }

    async fn replace_tables(
        &self,
        ctx: &Context<'_>,
        event_id: ID,
        tables: Vec<TableInput>,
    ) -> async_graphql::Result<GqlFloorPlan> {
        let event_id = parse_event_id(&event_id)?;
        let tables = tables
            .into_iter()
            .map(TableInput::into_table)
            .collect::<Result<Vec<_>, _>>()
            .map_err(gql_err)?;
        commit_and_reload(storage(ctx)?, &event_id, Commit::Tables(tables))
    }

    async fn replace_zones(
        &self,
        ctx: &Context<'_>,
        event_id: ID,
        zones: Vec<ZoneInput>,
    ) -> async_graphql::Result<GqlFloorPlan> {
        let event_id = parse_event_id(&event_id)?;
        let zones = zones
            .into_iter()
            .map(|z| models::Zone {
                id: z.id,
                name: z.name,
                color: z.color,
                price: z.price.unwrap_or(0.0),
            })
            .collect();
        commit_and_reload(storage(ctx)?, &event_id, Commit::Zones(zones))
    }

    async fn delete_event(&self, ctx: &Context<'_>, event_id: ID) -> async_graphql::Result<bool> {
        let event_id = parse_event_id(&event_id)?;
        storage(ctx)?.delete_event(&event_id).map_err(gql_err)
    }

    /// Re-derive every table label server-side and store the result.
    async fn relabel(&self, ctx: &Context<'_>, event_id: ID) -> async_graphql::Result<GqlFloorPlan> {
        let event_id = parse_event_id(&event_id)?;
        let storage = storage(ctx)?;
        let config = ctx
            .data_opt::<EditorConfig>()
            .copied()
            .unwrap_or_default();
        let mut plan = storage
            .load(&event_id)
            .map_err(gql_err)?
            .ok_or_else(|| gql_err(StoreError::NotFound(event_id.clone())))?;
        let changed = apply_labels(&mut plan, &config.labeling);
        tracing::info!(event_id = %event_id, tables = plan.tables.len(), changed, "relabeled");
        commit_and_reload(storage, &event_id, Commit::Tables(plan.tables))
    }
}

pub type Schema = async_graphql::Schema<QueryRoot, MutationRoot, async_graphql::EmptySubscription>;

pub fn build_schema(storage: Arc<Storage>, config: EditorConfig) -> Schema {
    async_graphql::Schema::build(QueryRoot, MutationRoot, async_graphql::EmptySubscription)
        .data(storage)
        .data(config)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::{Request, Variables};
    use serde_json::json;

    fn schema() -> (tempfile::TempDir, Schema) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(&dir.path().join("gql.redb")).unwrap();
        (dir, build_schema(storage, EditorConfig::default()))
    }

    async fn run(schema: &Schema, query: &str, vars: serde_json::Value) -> serde_json::Value {
        let resp = schema
            .execute(Request::new(query).variables(Variables::from_json(vars)))
            .await;
        assert!(resp.errors.is_empty(), "errors: {:?}", resp.errors);
        resp.data.into_json().unwrap()
    }

    async fn create(schema: &Schema) -> String {
        let data = run(
            schema,
            r#"mutation { createEvent(name: "Fair", width: 100, height: 100) { eventId } }"#,
            json!({}),
        )
        .await;
        data["createEvent"]["eventId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_and_query() {
        let (_dir, schema) = schema();
        let id = create(&schema).await;
        let data = run(
            &schema,
            "query($id: ID!) { floorPlan(eventId: $id) { name venue { width boundary { x } } tables { id } } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(data["floorPlan"]["name"], "Fair");
        assert_eq!(data["floorPlan"]["venue"]["width"], 100.0);
        assert_eq!(data["floorPlan"]["tables"], json!([]));
    }

    #[tokio::test]
    async fn test_replace_tables_accepts_model_json() {
        let (_dir, schema) = schema();
        let id = create(&schema).await;
        // The frontend sends serialized shared-model tables verbatim.
        let table = serde_json::to_value(models::Table::new(1, Point::new(50.0, 50.0))).unwrap();
        let data = run(
            &schema,
            "mutation($id: ID!, $tables: [TableInput!]!) { replaceTables(eventId: $id, tables: $tables) { tables { id status rotation } } }",
            json!({ "id": id, "tables": [table] }),
        )
        .await;
        assert_eq!(
            data["replaceTables"]["tables"],
            json!([{ "id": 1, "status": "available", "rotation": 0 }])
        );
    }

    #[tokio::test]
    async fn test_relabel_orders_wall_tables_first() {
        let (_dir, schema) = schema();
        let id = create(&schema).await;
        let tables = json!([
            { "id": 1, "x": 50.0, "y": 50.0, "width": 8.0, "height": 3.0 },
            { "id": 2, "x": 98.0, "y": 1.0, "width": 8.0, "height": 3.0 },
            { "id": 3, "x": 1.0, "y": 1.0, "width": 8.0, "height": 3.0 },
        ]);
        run(
            &schema,
            "mutation($id: ID!, $tables: [TableInput!]!) { replaceTables(eventId: $id, tables: $tables) { eventId } }",
            json!({ "id": id, "tables": tables }),
        )
        .await;
        let data = run(
            &schema,
            "mutation($id: ID!) { relabel(eventId: $id) { tables { id label } } }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(
            data["relabel"]["tables"],
            json!([
                { "id": 1, "label": "T-3" },
                { "id": 2, "label": "T-2" },
                { "id": 3, "label": "T-1" },
            ])
        );
    }

    #[tokio::test]
    async fn test_invalid_inputs_rejected() {
        let (_dir, schema) = schema();
        let resp = schema
            .execute(r#"mutation { createEvent(name: "x", width: -5) { eventId } }"#)
            .await;
        assert_eq!(resp.errors.len(), 1);

        let resp = schema
            .execute(r#"{ floorPlan(eventId: "not-a-uuid") { name } }"#)
            .await;
        assert!(resp.errors[0].message.contains("Invalid event id"));

        let id = create(&schema).await;
        let resp = schema
            .execute(
                Request::new(
                    "mutation($id: ID!) { replaceTables(eventId: $id, tables: [{ id: 1, x: 0, y: 0, width: 8, height: 3, rotation: 45 }]) { eventId } }",
                )
                .variables(Variables::from_json(json!({ "id": id }))),
            )
            .await;
        assert!(resp.errors[0].message.contains("rotation"));
    }

    #[tokio::test]
    async fn test_missing_event_and_delete() {
        let (_dir, schema) = schema();
        let ghost = uuid::Uuid::new_v4().to_string();
        let data = run(
            &schema,
            "query($id: ID!) { floorPlan(eventId: $id) { name } }",
            json!({ "id": ghost }),
        )
        .await;
        assert!(data["floorPlan"].is_null());

        let id = create(&schema).await;
        let data = run(
            &schema,
            "mutation($id: ID!) { deleteEvent(eventId: $id) }",
            json!({ "id": id }),
        )
        .await;
        assert_eq!(data["deleteEvent"], true);
        let data = run(&schema, "{ stats { totalEvents } }", json!({})).await;
        assert_eq!(data["stats"]["totalEvents"], 0);
    }
}
