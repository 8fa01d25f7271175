use crate::application::auth_service::AuthService;
use crate::application::order_service::OrderService;
use crate::data::catalog::IngredientCatalog;
use crate::data::memory::InMemoryOrderRepository;
use crate::data::user_repository::InMemoryUserRepository;
use crate::infrastructure::config::StubConfig;
use crate::presentation::auth::{delete_user, get_user, login, logout, refresh_token, register, update_user};
use crate::presentation::handlers::{AppState, create_order, health_check, list_ingredients, orders_of_user};
use crate::presentation::middleware::RequestTracing;
use actix_cors::Cors;
use actix_web::dev::{Server, ServerHandle};
use actix_web::{App, HttpServer, web};
use std::net::TcpListener;
use std::sync::Arc;
use tracing::info;

/// Builds fresh, empty stub state.
pub fn build_state(config: &StubConfig) -> web::Data<AppState> {
    let auth_service = AuthService::new(
        Arc::new(InMemoryUserRepository::new()),
        config.jwt_secret.clone(),
        config.access_token_ttl_secs,
    );
    let order_service = OrderService::new(
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(IngredientCatalog::seeded()),
    );

    web::Data::new(AppState {
        auth_service: Arc::new(auth_service),
        order_service: Arc::new(order_service),
    })
}

/// Mounts the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health_check))
            .route("/auth/register", web::post().to(register))
            .route("/auth/login", web::post().to(login))
            .route("/auth/token", web::post().to(refresh_token))
            .route("/auth/logout", web::post().to(logout))
            .route("/auth/user", web::get().to(get_user))
            .route("/auth/user", web::patch().to(update_user))
            .route("/auth/user", web::delete().to(delete_user))
            .route("/ingredients", web::get().to(list_ingredients))
            .route("/orders", web::post().to(create_order))
            .route("/orders", web::get().to(orders_of_user)),
    );
}

/// Starts serving on an already bound listener. The returned server must be
/// awaited or spawned to make progress.
pub fn run(listener: TcpListener, state: web::Data<AppState>, workers: usize) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Cors::permissive())
            .wrap(RequestTracing)
            .configure(configure)
    })
    .workers(workers)
    .listen(listener)?
    .run();
    Ok(server)
}

/// A stub running in the background of the current tokio runtime.
pub struct StubServer {
    base_url: String,
    handle: ServerHandle,
}

impl StubServer {
    /// Binds `127.0.0.1` on a free port and serves fresh state there.
    pub fn spawn(config: &StubConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let server = run(listener, build_state(config), 1)?;
        let handle = server.handle();
        tokio::spawn(server);

        let base_url = format!("http://{}", addr);
        info!(base_url = %base_url, "Contract stub started");
        Ok(Self { base_url, handle })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stops without waiting for idle keep-alive connections to drain.
    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
