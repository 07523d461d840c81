use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub openai_api_key: String,
    pub openai_api_base: Option<String>,
    pub openai_model: String,
    pub upload_dir: PathBuf,
    pub pipeline_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bloodwork.db".to_string());

        let openai_api_key =
            env::var("OPENAI_API_KEY").map_err(|_| anyhow!("OPENAI_API_KEY not found"))?;

        let openai_api_base = env::var("OPENAI_API_BASE").ok();

        let openai_model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let upload_dir =
            PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "data".to_string()));

        let pipeline_timeout_secs = match env::var("PIPELINE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| anyhow!("PIPELINE_TIMEOUT_SECS must be an integer"))?,
            Err(_) => 120,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| anyhow!("PORT must be a valid port number"))?,
            Err(_) => 8000,
        };

        Ok(AppConfig {
            database_url,
            openai_api_key,
            openai_api_base,
            openai_model,
            upload_dir,
            pipeline_timeout: Duration::from_secs(pipeline_timeout_secs),
            host,
            port,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    const VARS: [&str; 8] = [
        "DATABASE_URL",
        "OPENAI_API_KEY",
        "OPENAI_API_BASE",
        "OPENAI_MODEL",
        "UPLOAD_DIR",
        "PIPELINE_TIMEOUT_SECS",
        "HOST",
        "PORT",
    ];

    // The process environment is shared across the test binary, so each test
    // takes the lock, sets exactly the variables it needs, and restores the
    // previous state afterwards.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env(vars: &[(&str, &str)], check: impl FnOnce()) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());

        let saved: Vec<(&str, Option<String>)> =
            VARS.iter().map(|key| (*key, env::var(key).ok())).collect();
        for key in VARS {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(check));

        for (key, value) in saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }

    #[test]
    fn missing_api_key_is_an_error() {
        with_env(&[], || {
            let err = AppConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("OPENAI_API_KEY not found"));
        });
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        with_env(&[("OPENAI_API_KEY", "test-key")], || {
            let config = AppConfig::from_env().unwrap();
            assert_eq!(config.database_url, "sqlite:bloodwork.db");
            assert_eq!(config.openai_model, "gpt-4o-mini");
            assert_eq!(config.upload_dir, PathBuf::from("data"));
            assert_eq!(config.pipeline_timeout, Duration::from_secs(120));
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 8000);
            assert!(config.openai_api_base.is_none());
        });
    }

    #[test]
    fn malformed_timeout_is_a_descriptive_error() {
        with_env(
            &[
                ("OPENAI_API_KEY", "test-key"),
                ("PIPELINE_TIMEOUT_SECS", "soon"),
            ],
            || {
                let err = AppConfig::from_env().unwrap_err();
                assert!(err
                    .to_string()
                    .contains("PIPELINE_TIMEOUT_SECS must be an integer"));
            },
        );
    }

    #[test]
    fn malformed_port_is_a_descriptive_error() {
        with_env(
            &[("OPENAI_API_KEY", "test-key"), ("PORT", "eighty")],
            || {
                let err = AppConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("PORT must be a valid port number"));
            },
        );
    }
}
