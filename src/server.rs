//! Server lifecycle
//!
//! Wires configuration, database, services and the REST API together and
//! exposes a [`ServerHandle`] for graceful shutdown.

use std::sync::Arc;
use std::time::Instant;

use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::{AdminBootstrap, AuthService, ParcelService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::TokenService;
use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use crate::infrastructure::{init_database, run_migrations};
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, ApiContext};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── ServerOptions ──────────────────────────────────────────────────

/// Options for starting the SendIT API server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Create the configured admin user if none exists (default: true).
    pub create_default_admin: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            create_default_admin: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running SendIT server.
///
/// ```rust,no_run
/// use sendit::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to.
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the server:
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Create the default admin (if enabled)
    /// 4. Serve the REST API (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        info!("Starting SendIT...");

        if app_cfg.uses_default_secret() {
            warn!("⚠️  security.jwt_secret is the built-in development value; set your own");
        }

        let prometheus_handle = install_recorder();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&app_cfg.database_config()).await?;
        if opts.auto_migrate {
            run_migrations(&db).await?;
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let tokens = TokenService::new(app_cfg.jwt_config());
        info!(
            "JWT configured with {}ms token expiration",
            tokens.expiration_ms()
        );
        let auth_service = Arc::new(AuthService::new(repos.clone(), tokens));
        let parcel_service = Arc::new(ParcelService::new(repos.clone()));

        if opts.create_default_admin && app_cfg.admin.enabled {
            create_default_admin(&auth_service, &app_cfg).await;
        }

        // ── REST API server ────────────────────────────────────
        let router = create_api_router(ApiContext {
            db: db.clone(),
            auth_service,
            parcel_service,
            metrics: prometheus_handle,
            started_at: Arc::new(Instant::now()),
        });

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let api_shutdown = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.listen_addr()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 SendIT started.");

        Ok(Self {
            repos,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown without waiting.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        info!("⏳ Waiting for in-flight requests to complete...");

        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let completed = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !completed {
            warn!("Abandoning in-flight requests");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 SendIT shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down SendIT...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Create the configured admin unless one already exists. Failures are
/// logged and do not stop startup.
async fn create_default_admin(auth_service: &AuthService, app_cfg: &AppConfig) {
    let admin = &app_cfg.admin;
    let bootstrap = AdminBootstrap {
        first_name: admin.first_name.clone(),
        last_name: admin.last_name.clone(),
        username: admin.username.clone(),
        email: admin.email.clone(),
        password: admin.password.clone(),
    };

    match auth_service.ensure_admin(bootstrap).await {
        Ok(Some(user)) => {
            info!("Default admin created: {} <{}>", user.username, user.email);
            info!("⚠️  Please change the admin password immediately!");
        }
        Ok(None) => info!("Admin user already present"),
        Err(e) => error!("Failed to create admin user: {}", e),
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
/// `log` records from the persistence layer are forwarded through
/// `tracing-subscriber`'s log bridge.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
