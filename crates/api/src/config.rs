use sceneshot_storage::{AssetVisibility, StorageBackendType};

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `540` -- generation
    /// requests make several sequential model calls).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Generative API settings.
    pub genai: GenAiSettings,
    /// Object-store provider settings.
    pub storage: StorageSettings,
    /// Whether generated assets are made publicly readable.
    pub asset_visibility: AssetVisibility,
}

/// Generative API settings.
#[derive(Debug, Clone)]
pub struct GenAiSettings {
    /// API credential. `None` means the service starts but generation
    /// requests fail with an internal configuration error.
    pub api_key: Option<String>,
    /// API base URL.
    pub api_url: String,
    /// Image-capable model identifier.
    pub model: String,
}

/// Object-store provider settings, one variant per backend.
#[derive(Debug, Clone)]
pub enum StorageSettings {
    Local {
        base_path: String,
        public_base_url: String,
    },
    S3 {
        bucket: String,
        region: String,
    },
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                               |
    /// |------------------------------|---------------------------------------|
    /// | `HOST`                       | `0.0.0.0`                             |
    /// | `PORT`                       | `3000`                                |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`               |
    /// | `REQUEST_TIMEOUT_SECS`       | `540`                                 |
    /// | `GEMINI_API_KEY`             | unset (generation disabled)           |
    /// | `GENAI_API_URL`              | the public endpoint                   |
    /// | `GENAI_MODEL`                | the default image-capable model       |
    /// | `STORAGE_BACKEND`            | `local`                               |
    /// | `LOCAL_STORAGE_PATH`         | `./data/storage`                      |
    /// | `LOCAL_PUBLIC_BASE_URL`      | `http://localhost:3000/assets`        |
    /// | `S3_BUCKET` / `S3_REGION`    | required when `STORAGE_BACKEND=s3`    |
    /// | `GENERATED_ASSET_VISIBILITY` | `private`                             |
    ///
    /// # Panics
    ///
    /// Panics on malformed values and on missing required settings
    /// (`JWT_SECRET`, and the S3 settings when that backend is
    /// selected) -- misconfiguration should fail fast at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "540".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        let genai = GenAiSettings {
            api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|k| !k.is_empty()),
            api_url: std::env::var("GENAI_API_URL")
                .unwrap_or_else(|_| sceneshot_genai::client::DEFAULT_API_URL.into()),
            model: std::env::var("GENAI_MODEL")
                .unwrap_or_else(|_| sceneshot_genai::client::DEFAULT_MODEL.into()),
        };

        let backend_name = std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into());
        let backend = StorageBackendType::from_name(&backend_name)
            .unwrap_or_else(|e| panic!("Invalid STORAGE_BACKEND: {e}"));
        let storage = match backend {
            StorageBackendType::Local => StorageSettings::Local {
                base_path: std::env::var("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|_| "./data/storage".into()),
                public_base_url: std::env::var("LOCAL_PUBLIC_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/assets".into()),
            },
            StorageBackendType::S3 => StorageSettings::S3 {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3"),
                region: std::env::var("S3_REGION")
                    .expect("S3_REGION must be set when STORAGE_BACKEND=s3"),
            },
        };

        let visibility_name = std::env::var("GENERATED_ASSET_VISIBILITY")
            .unwrap_or_else(|_| AssetVisibility::Private.name().into());
        let asset_visibility = AssetVisibility::from_name(&visibility_name)
            .unwrap_or_else(|e| panic!("Invalid GENERATED_ASSET_VISIBILITY: {e}"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            genai,
            storage,
            asset_visibility,
        }
    }
}
