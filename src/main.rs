//! Mingzi API server.
//!
//! Loads configuration, wires adapters into `AppState` and serves the
//! router until Ctrl-C.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mingzi::adapters::analytics::TracingAnalyticsSink;
use mingzi::adapters::auth::{MockSessionValidator, SupabaseAuthConfig, SupabaseJwtValidator};
use mingzi::adapters::cache::{CacheSweeper, NoopCache, SweeperHandle, TtlCache};
use mingzi::adapters::creem::{CreemCheckoutProvider, CreemConfig, MockCheckoutProvider};
use mingzi::adapters::document::ChromiumRenderer;
use mingzi::adapters::http::{build_router, AppState, ErrorResponder, HttpSettings, RouterConfig};
use mingzi::adapters::memory::{InMemoryCreditLedger, InMemoryGenerationLogReader};
use mingzi::adapters::postgres::{PostgresCreditLedger, PostgresGenerationLogReader};
use mingzi::application::{CachedValue, SharedCache};
use mingzi::config::{AppConfig, ServerConfig};
use mingzi::domain::foundation::UserId;
use mingzi::ports::{CheckoutProvider, CreditLedger, GenerationLogReader, SessionValidator};

/// Token and user the development fallbacks accept.
const DEV_TOKEN: &str = "dev-token";
const DEV_USER_ID: &str = "dev-user";
const DEV_CREDITS: u32 = 10;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    for setting in config.missing_required() {
        tracing::warn!(setting, "Not configured; using development fallback");
    }

    let (ledger, generation_logs) = persistence(&config).await?;
    let session_validator = session_validator(&config);
    let checkout_provider = checkout_provider(&config)?;

    let mut renderer = ChromiumRenderer::new().with_timeout(config.render.timeout_secs);
    if let Some(path) = &config.render.chromium_path {
        renderer = renderer.with_chromium_path(path.clone());
    }

    let (cache, sweeper) = cache(&config);

    let state = AppState {
        ledger,
        renderer: Arc::new(renderer),
        checkout_provider,
        catalog: Arc::new(config.payment.load_catalog()?),
        generation_logs,
        analytics_sink: Arc::new(TracingAnalyticsSink::new()),
        session_validator,
        cache,
        errors: ErrorResponder::new(config.expose_error_details()),
        settings: HttpSettings {
            checkout_success_url: config.payment.success_url.clone(),
            pdf_credit_cost: config.features.pdf_credit_cost,
            side_effect_timeout: config.render.side_effect_timeout(),
        },
    };

    let router_config = RouterConfig {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
        ..RouterConfig::default()
    };
    let app = build_router(state, &router_config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting Mingzi API server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(sweeper) = sweeper {
        sweeper.shutdown().await;
    }
    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

async fn persistence(
    config: &AppConfig,
) -> Result<(Arc<dyn CreditLedger>, Arc<dyn GenerationLogReader>), BoxError> {
    if !config.database.is_configured() {
        tracing::warn!(
            user_id = DEV_USER_ID,
            credits = DEV_CREDITS,
            "Using in-memory credit ledger"
        );
        let ledger: Arc<dyn CreditLedger> = Arc::new(
            InMemoryCreditLedger::new().with_customer(UserId::new(DEV_USER_ID)?, DEV_CREDITS),
        );
        let logs: Arc<dyn GenerationLogReader> = Arc::new(InMemoryGenerationLogReader::new());
        return Ok((ledger, logs));
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let ledger: Arc<dyn CreditLedger> = Arc::new(PostgresCreditLedger::new(pool.clone()));
    let logs: Arc<dyn GenerationLogReader> = Arc::new(PostgresGenerationLogReader::new(pool));
    Ok((ledger, logs))
}

fn session_validator(config: &AppConfig) -> Arc<dyn SessionValidator> {
    match config.auth.jwt_secret() {
        Some(secret) => {
            let mut auth = SupabaseAuthConfig::new(secret.clone());
            if let Some(url) = &config.auth.supabase_url {
                auth = auth.with_project_url(url.clone());
            }
            Arc::new(SupabaseJwtValidator::new(auth))
        }
        None => {
            tracing::warn!(token = DEV_TOKEN, "Using mock session validator");
            Arc::new(MockSessionValidator::new().with_test_user(DEV_TOKEN, DEV_USER_ID))
        }
    }
}

fn checkout_provider(config: &AppConfig) -> Result<Arc<dyn CheckoutProvider>, BoxError> {
    match config.payment.api_key() {
        Some(key) => {
            let creem = CreemConfig::new(key.clone())
                .with_base_url(config.payment.creem_api_base_url.clone())
                .with_timeout(config.payment.request_timeout());
            Ok(Arc::new(CreemCheckoutProvider::new(creem)?))
        }
        None => {
            tracing::warn!("Using mock checkout provider");
            Ok(Arc::new(MockCheckoutProvider::new()))
        }
    }
}

fn cache(config: &AppConfig) -> (SharedCache, Option<SweeperHandle>) {
    if config.cache.disabled {
        tracing::info!("Response cache disabled");
        let noop: SharedCache = Arc::new(NoopCache::<CachedValue>::new());
        return (noop, None);
    }
    let ttl_config = config.cache.ttl_cache_config();
    let cache = Arc::new(TtlCache::<CachedValue>::new(ttl_config));
    let sweeper = CacheSweeper::spawn(Arc::clone(&cache), ttl_config.sweep_interval);
    let shared: SharedCache = cache;
    (shared, Some(sweeper))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
