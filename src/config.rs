use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub predictor_url: String,
    pub predictor_timeout: Duration,
    pub predictor_breaker_threshold: u32,
    pub carbon_stats_path: Option<String>,
    pub feature_importance_path: Option<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

fn positive<T>(name: &str, raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match raw.filter(|s| !s.trim().is_empty()) {
        None => Ok(default),
        Some(value) => {
            let parsed: T = value
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("{} must be a positive integer", name))?;
            if parsed <= T::default() {
                anyhow::bail!("{} must be greater than zero", name);
            }
            Ok(parsed)
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup (environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            predictor_url: lookup("PREDICTOR_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "http://127.0.0.1:5000".to_string())
                .trim()
                .to_string(),
            predictor_timeout: Duration::from_millis(positive(
                "PREDICTOR_TIMEOUT_MS",
                lookup("PREDICTOR_TIMEOUT_MS"),
                4000u64,
            )?),
            predictor_breaker_threshold: positive(
                "PREDICTOR_BREAKER_THRESHOLD",
                lookup("PREDICTOR_BREAKER_THRESHOLD"),
                3u32,
            )?,
            carbon_stats_path: lookup("CARBON_STATS_PATH").filter(|s| !s.trim().is_empty()),
            feature_importance_path: lookup("FEATURE_IMPORTANCE_PATH")
                .filter(|s| !s.trim().is_empty()),
            rate_limit_per_second: positive(
                "RATE_LIMIT_PER_SECOND",
                lookup("RATE_LIMIT_PER_SECOND"),
                10u64,
            )?,
            rate_limit_burst: positive("RATE_LIMIT_BURST", lookup("RATE_LIMIT_BURST"), 20u32)?,
        };

        let parsed = url::Url::parse(&config.predictor_url)
            .map_err(|e| anyhow::anyhow!("PREDICTOR_URL is not a valid URL: {}", e))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            anyhow::bail!("PREDICTOR_URL must start with http:// or https://");
        }

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Predictor URL: {}", config.predictor_url);
        tracing::debug!("Predictor timeout: {:?}", config.predictor_timeout);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.predictor_url, "http://127.0.0.1:5000");
        assert_eq!(config.predictor_timeout, Duration::from_millis(4000));
        assert_eq!(config.predictor_breaker_threshold, 3);
        assert!(config.carbon_stats_path.is_none());
        assert_eq!(config.rate_limit_burst, 20);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("PREDICTOR_URL", "https://predictor.internal:9000"),
            ("PREDICTOR_TIMEOUT_MS", "2500"),
            ("CARBON_STATS_PATH", "public/data/carbon_stats.json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.predictor_url, "https://predictor.internal:9000");
        assert_eq!(config.predictor_timeout, Duration::from_millis(2500));
        assert_eq!(
            config.carbon_stats_path.as_deref(),
            Some("public/data/carbon_stats.json")
        );
    }

    #[test]
    fn test_rejects_non_http_predictor() {
        assert!(load(&[("PREDICTOR_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("PREDICTOR_URL", "not a url")]).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        assert!(load(&[("PREDICTOR_TIMEOUT_MS", "0")]).is_err());
        assert!(load(&[("PREDICTOR_TIMEOUT_MS", "soon")]).is_err());
    }

    #[test]
    fn test_rejects_bad_port() {
        assert!(load(&[("PORT", "99999")]).is_err());
    }
}
