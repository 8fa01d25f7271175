use std::net::TcpListener;
use stellar_burgers_api::infrastructure::config::StubConfig;
use stellar_burgers_api::infrastructure::logging::init_logging;
use stellar_burgers_api::presentation::server::{build_state, run};
use tracing::{error, info, instrument};

#[tokio::main]
#[instrument]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = StubConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid stub configuration");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    info!("Creating in-memory stub state");
    let state = build_state(&config);

    info!(address = %config.bind_addr, "Binding server to address");
    let listener = TcpListener::bind(&config.bind_addr)?;
    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());

    info!(
        address = %config.bind_addr,
        routes = %"POST /api/auth/register, POST /api/auth/login, POST /api/auth/token, POST /api/auth/logout, GET|PATCH|DELETE /api/auth/user, GET /api/ingredients, GET|POST /api/orders",
        "Starting contract stub"
    );
    run(listener, state, workers)?.await
}
