mod config;
mod graphql;
mod storage;

use std::path::{Path, PathBuf};

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Router};
use floorplan_shared::EditorConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::Config;
use graphql::Schema;

async fn graphql_handler(State(state): State<AppState>, req: GraphQLRequest) -> GraphQLResponse {
    state.schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> Html<String> {
    Html(
        async_graphql::http::GraphiQLSource::build()
            .endpoint("/graphql")
            .finish(),
    )
}

#[derive(Clone)]
struct AppState {
    schema: Schema,
    dist_dir: PathBuf,
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(schema: Schema, dist_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest(
            "/dist",
            cached_static_router(dist_dir, CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(&dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    let state = AppState {
        schema,
        dist_dir: dist_dir.to_path_buf(),
    };

    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/", get(serve_index))
        .route("/event/{id}", get(serve_index))
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let storage = storage::Storage::open(&config.db_path)?;
    tracing::info!(db = %config.db_path.display(), "database opened");

    let schema = graphql::build_schema(storage, EditorConfig::default());
    let app = build_app(schema, &config.dist_dir);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "server running, GraphiQL at /graphql");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match std::fs::read_to_string(state.dist_dir.join("index.html")) {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Floor Plan Editor</title></head>
<body>
<h1>Floor Plan Editor</h1>
<p>Frontend not built yet. Visit <a href="/graphql">GraphiQL</a> to explore the API.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    /// Create a temp dir with a test file and return the dir path.
    fn temp_dir_with_file(file_name: &str, content: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(file_name), content).unwrap();
        dir
    }

    fn app_over(dist: &Path) -> (tempfile::TempDir, Router) {
        let db_dir = tempfile::tempdir().unwrap();
        let storage = storage::Storage::open(&db_dir.path().join("app.redb")).unwrap();
        let schema = graphql::build_schema(storage, EditorConfig::default());
        (db_dir, build_app(schema, dist))
    }

    async fn get_uri(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_dist_bundles_have_immutable_cache() {
        let dist_dir = temp_dir_with_file("app-abc123.js", "bundle()");
        let (_db, app) = app_over(dist_dir.path());

        let resp = get_uri(app, "/dist/app-abc123.js").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dist_dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dist_dir.path().join("assets")).unwrap();
        std::fs::write(dist_dir.path().join("assets/style-xyz.css"), "body{}").unwrap();
        let (_db, app) = app_over(dist_dir.path());

        let resp = get_uri(app, "/assets/style-xyz.css").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_bundles_are_gzipped_when_accepted() {
        let dist_dir = temp_dir_with_file("app-abc123.js", &"bundle();".repeat(400));
        let (_db, app) = app_over(dist_dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .uri("/dist/app-abc123.js")
                    .header("accept-encoding", "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("content-encoding").unwrap(), "gzip");
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dist_dir = temp_dir_with_file("index.html", "<html></html>");
        let (_db, app) = app_over(dist_dir.path());

        let resp = get_uri(app, "/dist/nonexistent.js").await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_event_route_serves_index() {
        let dist_dir = temp_dir_with_file("index.html", "<html>editor</html>");
        let (_db, app) = app_over(dist_dir.path());

        let resp = get_uri(app, "/event/5f0c").await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"<html>editor</html>");
    }

    #[tokio::test]
    async fn test_index_fallback_without_build() {
        let empty = tempfile::tempdir().unwrap();
        let (_db, app) = app_over(empty.path());

        let resp = get_uri(app, "/").await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_graphql_endpoint_answers() {
        let dist_dir = tempfile::tempdir().unwrap();
        let (_db, app) = app_over(dist_dir.path());

        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/graphql")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query":"{ stats { totalEvents } }"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["data"]["stats"]["totalEvents"], 0);
    }
}
