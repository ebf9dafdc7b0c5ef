// Plantmarket API server
//
// Marketplace backend connecting nurseries (sellers) and buyers around a
// plant catalog, carts, and orders, gated by role-scoped bearer tokens.

mod auth;
mod buyers;
mod cart;
mod error;
mod extract;
mod nurseries;
mod orders;
mod plants;
mod services;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::{extract::FromRef, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use plantmarket_contracts::*;
use plantmarket_storage::Database;

use crate::auth::{AuthConfig, AuthState, TokenCodec};
use crate::services::{CartService, OrderService, PlantService, UserService};

/// App state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthState,
    pub users: Arc<UserService>,
    pub plants: Arc<PlantService>,
    pub cart: Arc<CartService>,
    pub orders: Arc<OrderService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, codec: TokenCodec) -> Self {
        Self {
            auth: AuthState {
                codec: codec.clone(),
                db: db.clone(),
            },
            users: Arc::new(UserService::new(db.clone(), codec)),
            plants: Arc::new(PlantService::new(db.clone())),
            cart: Arc::new(CartService::new(db.clone())),
            orders: Arc::new(OrderService::new(db)),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Registers the bearer scheme referenced by the protected paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        buyers::register_buyer,
        buyers::login_buyer,
        buyers::get_buyer,
        buyers::update_buyer,
        buyers::delete_buyer,
        nurseries::register_nursery,
        nurseries::login_nursery,
        nurseries::get_nursery,
        nurseries::update_nursery,
        nurseries::delete_nursery,
        plants::create_plant,
        plants::list_plants,
        plants::list_own_plants,
        plants::update_plant,
        plants::delete_plant,
        cart::upsert_cart_item,
        cart::list_cart,
        cart::delete_cart_item,
        orders::place_order,
        orders::list_orders,
        orders::list_received_orders,
        orders::update_order_status,
    ),
    components(
        schemas(
            Envelope,
            Role, Rating, Buyer, Nursery,
            RegisterBuyerRequest, RegisterNurseryRequest,
            LoginRequest, LoginData,
            UpdateBuyerRequest, UpdateNurseryRequest,
            Plant, CreatePlantRequest, UpdatePlantRequest,
            CartItem, UpsertCartRequest,
            Order, OrderStatus, PlaceOrderRequest, UpdateOrderStatusRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "buyers", description = "Buyer account endpoints"),
        (name = "nurseries", description = "Nursery account endpoints"),
        (name = "plants", description = "Plant catalog endpoints"),
        (name = "cart", description = "Buyer cart endpoints"),
        (name = "orders", description = "Order endpoints")
    ),
    info(
        title = "Plantmarket API",
        version = "0.2.0",
        description = "Marketplace API for nurseries, buyers, plants, carts, and orders",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "plantmarket_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("plantmarket-api starting...");

    // Initialize database
    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL environment variable required")?;
    let db = Database::from_url(&database_url)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await.context("Failed to run migrations")?;
    tracing::info!("Connected to database, migrations applied");

    // Token signing configuration; the secret is injected here and nowhere
    // else has access to it
    let auth_config = AuthConfig::from_env().context("Failed to load auth configuration")?;
    let codec = TokenCodec::new(&auth_config.secret, auth_config.token_ttl);
    tracing::info!(
        ttl_days = auth_config.token_ttl.num_days(),
        "Token codec configured"
    );

    let state = AppState::new(Arc::new(db), codec);

    // Load CORS allowed origins from environment (optional)
    // Example: CORS_ALLOWED_ORIGINS="https://app.example.com,https://admin.example.com"
    let cors_origins: Vec<HeaderValue> = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect()
        })
        .unwrap_or_default();

    if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
    }

    let api_routes = Router::new()
        .merge(buyers::routes(state.clone()))
        .merge(nurseries::routes(state.clone()))
        .merge(plants::routes(state.clone()))
        .merge(cart::routes(state.clone()))
        .merge(orders::routes(state));

    let app = Router::new()
        .route("/health", get(health))
        .merge(api_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()));

    // Add CORS layer only if origins are configured
    let app = if !cors_origins.is_empty() {
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ]),
        )
    } else {
        app
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
