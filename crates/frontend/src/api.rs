use dioxus::logger::tracing;
use floorplan_shared::models::FloorPlan;
use floorplan_shared::store::Commit;
use serde::{Deserialize, Serialize};

/// Fields requested whenever a whole floor plan comes back. The response
/// decodes straight into the shared model.
const FLOOR_PLAN_FIELDS: &str = r#"
    eventId name
    venue { width height boundary { x y } }
    tables { id label x y width height rotation status vendorId zoneId }
    zones { id name color price }
"#;

const REPLACE_VENUE: &str = r#"mutation ReplaceVenue($eventId: ID!, $venue: VenueInput!) {
    replaceVenue(eventId: $eventId, venue: $venue) { updatedAt }
}"#;

const REPLACE_TABLES: &str = r#"mutation ReplaceTables($eventId: ID!, $tables: [TableInput!]!) {
    replaceTables(eventId: $eventId, tables: $tables) { updatedAt }
}"#;

const REPLACE_ZONES: &str = r#"mutation ReplaceZones($eventId: ID!, $zones: [ZoneInput!]!) {
    replaceZones(eventId: $eventId, zones: $zones) { updatedAt }
}"#;

/// Pick the mutation for a commit and build its variables. The shared models
/// serialize to exactly the shape the input types expect.
pub fn build_commit_request(
    event_id: &str,
    commit: &Commit,
) -> Result<(&'static str, serde_json::Value), String> {
    let to_value = |v: serde_json::Result<serde_json::Value>| v.map_err(|e| e.to_string());
    Ok(match commit {
        Commit::Venue(venue) => (
            REPLACE_VENUE,
            serde_json::json!({ "eventId": event_id, "venue": to_value(serde_json::to_value(venue))? }),
        ),
        Commit::Tables(tables) => (
            REPLACE_TABLES,
            serde_json::json!({ "eventId": event_id, "tables": to_value(serde_json::to_value(tables))? }),
        ),
        Commit::Zones(zones) => (
            REPLACE_ZONES,
            serde_json::json!({ "eventId": event_id, "zones": to_value(serde_json::to_value(zones))? }),
        ),
    })
}

pub fn build_create_event_variables(name: &str, width: f64, height: f64) -> serde_json::Value {
    serde_json::json!({ "name": name, "width": width, "height": height })
}

/// Shareable editor URL for an event.
pub fn build_event_url(origin: &str, event_id: &str) -> String {
    format!("{}/event/{}", origin, event_id)
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQLError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

impl<T> GraphQLResponse<T> {
    fn into_result(self) -> Result<T, String> {
        if let Some(first) = self.errors.and_then(|errors| errors.into_iter().next()) {
            return Err(first.message);
        }
        self.data.ok_or_else(|| "No data returned".to_string())
    }
}

pub fn origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}

fn api_url() -> String {
    format!("{}/graphql", origin().unwrap_or_default())
}

async fn query<T: for<'de> Deserialize<'de>>(
    query_str: &str,
    variables: Option<serde_json::Value>,
) -> Result<T, String> {
    let req = GraphQLRequest {
        query: query_str.to_string(),
        variables,
    };

    let resp = reqwest::Client::new()
        .post(api_url())
        .json(&req)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let gql_resp: GraphQLResponse<T> = resp.json().await.map_err(|e| e.to_string())?;
    gql_resp.into_result()
}

// Responses

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanResponse {
    pub floor_plan: Option<FloorPlan>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    pub create_event: FloorPlan,
}

// API functions

pub async fn fetch_floor_plan(event_id: &str) -> Result<Option<FloorPlan>, String> {
    let resp: FloorPlanResponse = query(
        &format!("query FloorPlan($id: ID!) {{ floorPlan(eventId: $id) {{ {FLOOR_PLAN_FIELDS} }} }}"),
        Some(serde_json::json!({ "id": event_id })),
    )
    .await?;
    Ok(resp.floor_plan)
}

pub async fn create_event(name: &str, width: f64, height: f64) -> Result<FloorPlan, String> {
    let resp: CreateEventResponse = query(
        &format!(
            "mutation CreateEvent($name: String!, $width: Float, $height: Float) {{ \
             createEvent(name: $name, width: $width, height: $height) {{ {FLOOR_PLAN_FIELDS} }} }}"
        ),
        Some(build_create_event_variables(name, width, height)),
    )
    .await?;
    Ok(resp.create_event)
}

pub async fn send_commit(event_id: &str, commit: &Commit) -> Result<(), String> {
    let (mutation, variables) = build_commit_request(event_id, commit)?;
    let _: serde_json::Value = query(mutation, Some(variables)).await?;
    Ok(())
}

/// Fire-and-forget persistence. Commits of one batch go out in order; a
/// failure is logged and local state is kept as is.
pub fn send_commits(event_id: &str, commits: Vec<Commit>) {
    if commits.is_empty() {
        return;
    }
    let event_id = event_id.to_string();
    wasm_bindgen_futures::spawn_local(async move {
        for commit in &commits {
            if let Err(e) = send_commit(&event_id, commit).await {
                tracing::error!(event_id = %event_id, kind = commit.kind(), error = %e, "commit failed");
            }
        }
    });
}
