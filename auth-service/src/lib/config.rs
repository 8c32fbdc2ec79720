use std::env;

use auth::TokenPolicy;
use chrono::Duration;
use chrono::Utc;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub store: StoreConfig,
    pub revocation: RevocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_window_minutes: i64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct StoreConfig {
    /// JSON document holding the user directory; in-memory when unset
    pub users_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RevocationConfig {
    pub sweep_interval_seconds: u64,
}

impl JwtConfig {
    /// Token lifetimes derived from the configured minutes.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Access lifetime is not positive, refresh window
    ///   is negative, or either is too large to add to the current time
    pub fn token_policy(&self) -> Result<TokenPolicy, ConfigError> {
        if self.access_token_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_ttl_minutes must be positive".to_string(),
            ));
        }
        if self.refresh_window_minutes < 0 {
            return Err(ConfigError::Message(
                "jwt.refresh_window_minutes must not be negative".to_string(),
            ));
        }

        Ok(TokenPolicy {
            access_ttl: lifetime("jwt.access_token_ttl_minutes", self.access_token_ttl_minutes)?,
            refresh_window: lifetime("jwt.refresh_window_minutes", self.refresh_window_minutes)?,
        })
    }
}

fn lifetime(key: &str, minutes: i64) -> Result<Duration, ConfigError> {
    Duration::try_minutes(minutes)
        .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
        .ok_or_else(|| ConfigError::Message(format!("{} is out of range", key)))
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl_minutes", &self.access_token_ttl_minutes)
            .field("refresh_window_minutes", &self.refresh_window_minutes)
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (everything except `jwt.secret`)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8000)?
            .set_default("jwt.algorithm", "HS256")?
            .set_default("jwt.access_token_ttl_minutes", 24 * 60)?
            .set_default("jwt.refresh_window_minutes", 15)?
            .set_default("revocation.sweep_interval_seconds", 300)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        if config.jwt.secret.is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        config.jwt.token_policy()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(access_token_ttl_minutes: i64, refresh_window_minutes: i64) -> JwtConfig {
        JwtConfig {
            secret: "s3cr3t-value".to_string(),
            algorithm: "HS256".to_string(),
            access_token_ttl_minutes,
            refresh_window_minutes,
        }
    }

    #[test]
    fn test_token_policy() {
        let jwt = jwt(60, 15);

        let policy = jwt.token_policy().unwrap();
        assert_eq!(policy.access_ttl, Duration::hours(1));
        assert_eq!(policy.refresh_window, Duration::minutes(15));
        assert!(!format!("{:?}", jwt).contains("s3cr3t-value"));
    }

    #[test]
    fn test_token_policy_allows_zero_refresh_window() {
        let policy = jwt(60, 0).token_policy().unwrap();
        assert_eq!(policy.refresh_window, Duration::zero());
    }

    #[test]
    fn test_token_policy_rejects_bad_lifetimes() {
        for (ttl, window) in [
            (0, 15),
            (-5, 15),
            (60, -1),
            (i64::MAX, 15),
            (144_000_000_000, 15),
            (60, i64::MAX),
        ] {
            assert!(
                matches!(jwt(ttl, window).token_policy(), Err(ConfigError::Message(_))),
                "ttl={} window={} should be rejected",
                ttl,
                window
            );
        }
    }
}
