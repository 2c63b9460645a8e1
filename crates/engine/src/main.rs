//! Atelier Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::App;
use infrastructure::{
    cloudinary::CloudinaryClient,
    openai::OpenAiClient,
    persistence::{connect, ensure_schema, SqliteRepositories},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine is usually run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atelier Engine");

    // Load configuration
    let database_url = std::env::var("DATABASE_URL").unwrap_or_else(|_| "atelier.db".into());
    let openai_base_url =
        std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com".into());
    let openai_api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let chat_model = std::env::var("OPENAI_CHAT_MODEL").unwrap_or_else(|_| "gpt-4".into());
    let image_model = std::env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-3".into());
    let cloudinary_base_url = std::env::var("CLOUDINARY_URL_BASE")
        .unwrap_or_else(|_| "https://api.cloudinary.com".into());
    let cloudinary_cloud_name = std::env::var("CLOUDINARY_CLOUD_NAME").unwrap_or_default();
    let cloudinary_api_key = std::env::var("CLOUDINARY_API_KEY").unwrap_or_default();
    let cloudinary_api_secret = std::env::var("CLOUDINARY_API_SECRET").unwrap_or_default();
    let cloudinary_folder =
        std::env::var("CLOUDINARY_UPLOAD_FOLDER").unwrap_or_else(|_| "ai-images".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "8000".into())
        .parse()
        .unwrap_or(8000);

    if openai_api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY is not set, provider calls will be rejected");
    }
    if cloudinary_api_secret.is_empty() {
        tracing::warn!("CLOUDINARY_API_SECRET is not set, publishing will be rejected");
    }

    // Connect to SQLite and ensure the schema exists
    tracing::info!("Opening database at {}", database_url);
    let pool = connect(&database_url).await?;
    ensure_schema(&pool).await?;
    let repos = SqliteRepositories::new(pool);

    // Create provider clients. One OpenAI client serves both ports.
    let openai = Arc::new(OpenAiClient::new(
        &openai_base_url,
        &openai_api_key,
        &chat_model,
        &image_model,
    ));
    let assets = Arc::new(CloudinaryClient::new(
        &cloudinary_base_url,
        &cloudinary_cloud_name,
        &cloudinary_api_key,
        &cloudinary_api_secret,
        &cloudinary_folder,
    ));

    // Create application
    let app = Arc::new(App::new(repos, openai.clone(), openai, assets));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(allowed_origins) = allowed_origins else {
        return None;
    };

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // The frontend sends X-User-Id and JSON content types which trigger CORS preflights.
        .allow_headers([
            HeaderName::from_static("x-user-id"),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
