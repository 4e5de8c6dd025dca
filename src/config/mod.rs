use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub admin: AdminBootstrapConfig,
    pub routing: RoutingConfig,
    /// Set while the frontend build pipeline prerenders pages. The admin
    /// bookings listing answers with an empty array in this phase.
    pub build_phase: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://...` or `memory://` for the in-process store
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub session_cookie: String,
    pub secure_cookie: bool,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Fixed identity created by `POST /api/admin/setup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBootstrapConfig {
    pub email: String,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    pub auth_pages: Vec<String>,
    pub provider_prefix: String,
    pub protected_prefixes: Vec<String>,
    pub provider_home: String,
    pub customer_home: String,
    pub login_page: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            auth_pages: vec!["/login".to_string(), "/register".to_string()],
            provider_prefix: "/provider/dashboard".to_string(),
            protected_prefixes: vec![
                "/customer".to_string(),
                "/provider".to_string(),
                "/admin".to_string(),
                "/booking".to_string(),
            ],
            provider_home: "/provider/dashboard".to_string(),
            customer_home: "/customer/index".to_string(),
            login_page: "/login".to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("HUB_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_SESSION_COOKIE") {
            self.security.session_cookie = v;
        }
        if let Ok(v) = env::var("SECURITY_SECURE_COOKIE") {
            self.security.secure_cookie = v.parse().unwrap_or(self.security.secure_cookie);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        // Admin bootstrap overrides
        if let Ok(v) = env::var("ADMIN_EMAIL") {
            self.admin.email = v;
        }
        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.admin.username = v;
        }
        if let Ok(v) = env::var("ADMIN_NAME") {
            self.admin.name = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.admin.password = v;
        }

        // Build pipeline flag
        if let Ok(v) = env::var("APP_BUILD_PHASE") {
            self.build_phase = v.parse().unwrap_or(self.build_phase);
        }
        if env::var("NEXT_PHASE").as_deref() == Ok("phase-production-build") {
            self.build_phase = true;
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "memory://".to_string(),
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: "development-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                session_cookie: "servicehub_session".to_string(),
                secure_cookie: false,
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            admin: AdminBootstrapConfig::default_identity(),
            routing: RoutingConfig::default(),
            build_phase: false,
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                session_cookie: "servicehub_session".to_string(),
                secure_cookie: true,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            admin: AdminBootstrapConfig::default_identity(),
            routing: RoutingConfig::default(),
            build_phase: false,
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: String::new(),
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 12,
                session_cookie: "servicehub_session".to_string(),
                secure_cookie: true,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            admin: AdminBootstrapConfig::default_identity(),
            routing: RoutingConfig::default(),
            build_phase: false,
        }
    }

    /// Development preset without reading the environment.
    pub fn for_tests() -> Self {
        Self::development()
    }
}

impl AdminBootstrapConfig {
    fn default_identity() -> Self {
        Self {
            email: "admin@servicehub.local".to_string(),
            username: "admin".to_string(),
            name: "Administrator".to_string(),
            password: "admin123".to_string(),
        }
    }
}
