use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth_service::domain::authentication::service::AuthService;
use auth_service::domain::user::service::UserService;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::repositories::SqliteUserRepository;
use chrono::Duration;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ACCESS_TOKEN_MINUTES: i64 = 15;

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = test_pool().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            Duration::minutes(ACCESS_TOKEN_MINUTES),
        ));
        let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
        let user_service = Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
        ));
        let auth_service = Arc::new(AuthService::new(user_service, Arc::clone(&authenticator)));

        let router = create_router(auth_service, authenticator);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            pool,
            api_client: client(),
            jwt_handler: JwtHandler::new(JWT_SECRET, Duration::minutes(ACCESS_TOKEN_MINUTES)),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    pub async fn sign_up(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/sign-up")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/auth/sign-in")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }
}

/// A client with its own cookie store, isolated from `TestApp::api_client`.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create reqwest client")
}

/// Fresh in-memory database with migrations applied.
///
/// A single never-recycled connection keeps the database alive for the pool's lifetime.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}
