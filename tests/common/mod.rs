#![allow(dead_code)]

use std::future::Future;
use std::sync::{Arc, Mutex};
use stellar_burgers_api::client::{ApiResponse, OrderClient, RestClient, UserClient};
use stellar_burgers_api::domain::user::User;
use stellar_burgers_api::infrastructure::config::{ClientConfig, StubConfig, live_mode_enabled};
use stellar_burgers_api::infrastructure::logging::try_init_test_logging;
use stellar_burgers_api::presentation::server::StubServer;

/// Clients for one scenario plus the sessions to remove once it is over.
#[derive(Clone)]
pub struct Scenario {
    pub users: UserClient,
    pub orders: OrderClient,
    created: Arc<Mutex<Vec<String>>>,
}

impl Scenario {
    /// Registers `user` and schedules its deletion. Returns the response and
    /// the access token, if one was issued.
    pub async fn register(&self, user: &User) -> (ApiResponse, Option<String>) {
        let response = self
            .users
            .create_user(user)
            .await
            .expect("register request failed");
        let token = response.str_at("accessToken");
        if let Some(token) = &token {
            self.track(token);
        }
        (response, token)
    }

    /// Registers `user` and returns its access token, failing the scenario otherwise.
    pub async fn register_ok(&self, user: &User) -> String {
        let (response, token) = self.register(user).await;
        assert_eq!(response.status(), 200, "fixture registration failed: {}", response.raw());
        token.expect("registration returned no accessToken")
    }

    /// The first `n` catalog ids, failing the scenario if the catalog is smaller.
    pub async fn first_ingredients(&self, n: usize) -> Vec<String> {
        let ids = self
            .orders
            .ingredient_ids()
            .await
            .expect("ingredient catalog request failed");
        assert!(ids.len() >= n, "catalog has only {} ingredients", ids.len());
        ids.into_iter().take(n).collect()
    }

    pub fn track(&self, token: &str) {
        self.created.lock().unwrap().push(token.to_string());
    }

    async fn teardown(&self) {
        let tokens: Vec<String> = self.created.lock().unwrap().drain(..).collect();
        for token in tokens {
            // Best effort; a failed cleanup never fails the scenario.
            let _ = self.users.delete_user(Some(&token)).await;
        }
    }
}

/// Runs `body` against the stub, or the configured service when
/// `STELLAR_BURGERS_LIVE` is set, and deletes every tracked user afterwards,
/// even when `body` panics.
pub async fn run_scenario<F, Fut>(body: F)
where
    F: FnOnce(Scenario) -> Fut,
    Fut: Future<Output = ()> + Send + 'static,
{
    try_init_test_logging();

    let (config, stub) = if live_mode_enabled() {
        (ClientConfig::from_env(), None)
    } else {
        let stub = StubServer::spawn(&StubConfig::default()).expect("failed to start stub");
        (ClientConfig::new(stub.base_url()), Some(stub))
    };

    let rest = RestClient::new(&config).expect("failed to build HTTP client");
    let scenario = Scenario {
        users: UserClient::new(rest.clone()),
        orders: OrderClient::new(rest),
        created: Arc::new(Mutex::new(Vec::new())),
    };

    let outcome = tokio::spawn(body(scenario.clone())).await;
    scenario.teardown().await;
    drop(scenario);
    if let Some(stub) = stub {
        stub.stop().await;
    }

    if let Err(err) = outcome {
        if err.is_panic() {
            std::panic::resume_unwind(err.into_panic());
        }
        panic!("scenario task failed: {}", err);
    }
}

pub fn assert_failure(response: &ApiResponse, status: u16, message: &str) {
    assert_eq!(response.status(), status, "unexpected status, body: {}", response.raw());
    assert_eq!(response.success(), Some(false));
    assert_eq!(response.message().as_deref(), Some(message));
}

pub fn assert_session(response: &ApiResponse) {
    assert_eq!(response.status(), 200, "unexpected status, body: {}", response.raw());
    assert_eq!(response.success(), Some(true));

    let access_token = response.str_at("accessToken").expect("no accessToken");
    assert!(access_token.starts_with("Bearer "));
    assert!(access_token.len() > 7);

    let refresh_token = response.str_at("refreshToken").expect("no refreshToken");
    assert!(!refresh_token.is_empty());
}

pub fn assert_same_email(actual: Option<String>, expected: &Option<String>) {
    let actual = actual.expect("no email in response");
    let expected = expected.as_deref().expect("fixture has no email");
    assert!(
        actual.eq_ignore_ascii_case(expected),
        "email {} does not match {}",
        actual,
        expected
    );
}
