use anyhow::Result;
use profil_cms::{
    application::{
        dto::Actor,
        ports::{
            authentication::ActorResolver, authorization::Authorizer, time::Clock,
            util::SlugGenerator,
        },
        services::{ApplicationServices, Repositories},
    },
    config::AppConfig,
    domain::user::UserId,
    infrastructure::{
        database,
        repositories::{in_memory_repositories, postgres_repositories},
        security::{PostgresAuthorizer, PostgresTokenResolver, StaticAuthorizer, StaticTokenResolver},
        time::SystemClock,
        util::DefaultSlugGenerator,
    },
    presentation::http::{
        routes::{RouterOptions, build_router},
        state::HttpState,
    },
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

struct Backend {
    repos: Repositories,
    authorizer: Arc<dyn Authorizer>,
    actor_resolver: Arc<dyn ActorResolver>,
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let backend = if config.uses_memory_store() {
        memory_backend(&config)
    } else {
        postgres_backend(&config).await?
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);

    let services = Arc::new(ApplicationServices::new(
        backend.repos,
        backend.authorizer,
        backend.actor_resolver,
        clock,
        slugger,
        config.default_per_page(),
    ));

    let state = HttpState { services };
    let options = RouterOptions {
        allowed_origins: config.allowed_origins().to_vec(),
        rate_limit_per_second: config.rate_limit_per_second(),
    };
    let app = build_router(state, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

fn memory_backend(config: &AppConfig) -> Backend {
    let mut authorizer = StaticAuthorizer::new();
    let mut resolver = StaticTokenResolver::new();
    match config.dev_api_token() {
        Some(token) => {
            let admin = Actor::new(UserId(1), "developer");
            authorizer = authorizer.super_admin(admin.id);
            resolver = resolver.with_token(token, admin);
        }
        None => tracing::warn!("DEV_API_TOKEN is not set; the admin API will reject every request"),
    }
    tracing::info!("using the in-memory store; data is lost on shutdown");

    Backend {
        repos: in_memory_repositories(),
        authorizer: Arc::new(authorizer),
        actor_resolver: Arc::new(resolver),
    }
}

async fn postgres_backend(config: &AppConfig) -> Result<Backend> {
    let pool = database::init_pool(config.database_url(), config.db_max_connections()).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(Backend {
        repos: postgres_repositories(&pool),
        authorizer: Arc::new(PostgresAuthorizer::new(pool.clone())),
        actor_resolver: Arc::new(PostgresTokenResolver::new(pool)),
    })
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
