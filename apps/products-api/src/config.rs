//! Configuration for Products API

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, ConfigError, FromEnv};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub mongodb: MongoConfig,
    /// Collection holding product documents
    pub products_collection: String,
    /// Comma-separated origins; no CORS layer when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let app = app_info!();
        let server = ServerConfig::from_env()?;

        // The binary name is reported to MongoDB unless MONGODB_APP_NAME overrides it
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            environment: Environment::from_env(),
            server,
            mongodb,
            products_collection: env_or_default(
                "PRODUCTS_COLLECTION",
                domain_products::mongodb::DEFAULT_COLLECTION,
            ),
            cors_allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
                .ok()
                .filter(|origins| !origins.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONGO_VARS: [(&str, Option<&str>); 2] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("catalog")),
    ];

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                MONGO_VARS[0],
                MONGO_VARS[1],
                ("PORT", None),
                ("PRODUCTS_COLLECTION", None),
                ("CORS_ALLOWED_ORIGIN", None),
                ("APP_ENV", None),
                ("MONGODB_APP_NAME", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.app.name, "products_api");
                assert_eq!(config.mongodb.app_name.as_deref(), Some("products_api"));
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.server.port, 8080);
                assert_eq!(config.mongodb.database(), "catalog");
                assert_eq!(config.products_collection, "products");
                assert!(config.cors_allowed_origin.is_none());
            },
        );
    }

    #[test]
    fn test_config_overrides() {
        temp_env::with_vars(
            [
                MONGO_VARS[0],
                MONGO_VARS[1],
                ("PORT", Some("3003")),
                ("PRODUCTS_COLLECTION", Some("catalog_items")),
                ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
                ("APP_ENV", Some("production")),
                ("MONGODB_APP_NAME", Some("catalog-service")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.environment.is_production());
                assert_eq!(config.mongodb.app_name.as_deref(), Some("catalog-service"));
                assert_eq!(config.server.port, 3003);
                assert_eq!(config.products_collection, "catalog_items");
                assert_eq!(
                    config.cors_allowed_origin.as_deref(),
                    Some("http://localhost:3000")
                );
            },
        );
    }

    #[test]
    fn test_blank_cors_origin_is_ignored() {
        temp_env::with_vars(
            [
                MONGO_VARS[0],
                MONGO_VARS[1],
                ("CORS_ALLOWED_ORIGIN", Some("  ")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.cors_allowed_origin.is_none());
            },
        );
    }

    #[test]
    fn test_missing_mongodb_url_fails() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", None),
                ("MONGO_URL", None),
                ("MONGODB_DATABASE", Some("catalog")),
            ],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::MissingEnvVar(_)));
            },
        );
    }

    #[test]
    fn test_invalid_port_fails() {
        temp_env::with_vars(
            [MONGO_VARS[0], MONGO_VARS[1], ("PORT", Some("http"))],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "PORT"));
            },
        );
    }
}
