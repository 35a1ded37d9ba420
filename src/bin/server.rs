use std::{net::SocketAddr, path::PathBuf};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wallets_api::{
    AppState, Config, Profile, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for wallets_api.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The configuration profile, overrides the WALLETS_CONFIG environment variable.
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// The directory that holds the profile's SQLite database.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// File path to the application SQLite database, overrides the profile's database.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The prefix for links in responses, overrides the WALLETS_BASE_URL environment variable.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let mut config = Config::from_env(args.profile, &args.data_dir, args.port)
        .unwrap_or_else(|error| panic!("Could not load the configuration: {error}"));

    if let Some(db_path) = args.db_path {
        config.database_path = db_path;
    }

    if let Some(base_url) = args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_owned();
    }

    tracing::info!(
        "Using the {} profile with the database {:#?}",
        config.profile,
        config.database_path
    );

    let state = AppState::from_config(&config).unwrap_or_else(|error| {
        panic!(
            "Could not open the database at {:#?}: {error}",
            config.database_path
        )
    });

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly");
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they are converted into responses.
        .on_failure(());

    router.layer(tracing_layer)
}
