use crate::workload::{BalancePolicy, CoordinatorSettings, ImpactThresholds};
use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the engine and its operator tooling.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub workload: WorkloadConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = WorkloadConfig::default();
        let workload = WorkloadConfig {
            target_average: positive_f64("WORKLOAD_TARGET_AVERAGE", defaults.target_average)?,
            utilization_capacity_days: positive_f64(
                "WORKLOAD_UTILIZATION_CAPACITY",
                defaults.utilization_capacity_days,
            )?,
            debounce_ms: env_u64("WORKLOAD_DEBOUNCE_MS", defaults.debounce_ms)?,
            significant_change: positive_f64(
                "WORKLOAD_SIGNIFICANT_CHANGE",
                defaults.significant_change,
            )?,
            notable_swing: positive_f64("WORKLOAD_NOTABLE_SWING", defaults.notable_swing)?,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            workload,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scoring policy knobs that operators may tune without a rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadConfig {
    /// Trip days per period considered balanced.
    pub target_average: f64,
    /// Trip days that represent 100% utilization.
    pub utilization_capacity_days: f64,
    pub debounce_ms: u64,
    pub significant_change: f64,
    pub notable_swing: f64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            target_average: 10.0,
            utilization_capacity_days: 20.0,
            debounce_ms: 100,
            significant_change: 10.0,
            notable_swing: 15.0,
        }
    }
}

impl WorkloadConfig {
    pub fn balance_policy(&self) -> BalancePolicy {
        BalancePolicy {
            target_average: self.target_average,
            utilization_capacity_days: self.utilization_capacity_days,
        }
    }

    pub fn impact_thresholds(&self) -> ImpactThresholds {
        ImpactThresholds {
            significant_change: self.significant_change,
            notable_swing: self.notable_swing,
        }
    }

    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            quiet_period: Duration::from_millis(self.debounce_ms),
            thresholds: self.impact_thresholds(),
        }
    }
}

fn positive_f64(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key,
            value: raw.clone(),
        })?;

    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { key });
    }

    Ok(value)
}

fn env_u64(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidNumber { key: &'static str, value: String },
    NonPositive { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be numeric (got '{value}')")
            }
            ConfigError::NonPositive { key } => write!(f, "{key} must be greater than zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_LOG_LEVEL",
            "WORKLOAD_TARGET_AVERAGE",
            "WORKLOAD_UTILIZATION_CAPACITY",
            "WORKLOAD_DEBOUNCE_MS",
            "WORKLOAD_SIGNIFICANT_CHANGE",
            "WORKLOAD_NOTABLE_SWING",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.workload, WorkloadConfig::default());

        let settings = config.workload.coordinator_settings();
        assert_eq!(settings.quiet_period, Duration::from_millis(100));
        assert_eq!(settings.thresholds.significant_change, 10.0);
        assert_eq!(settings.thresholds.notable_swing, 15.0);
    }

    #[test]
    fn overrides_target_average_and_debounce() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "ci");
        env::set_var("WORKLOAD_TARGET_AVERAGE", "12.5");
        env::set_var("WORKLOAD_DEBOUNCE_MS", "250");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.workload.balance_policy().target_average, 12.5);
        assert_eq!(config.workload.debounce_ms, 250);
        reset_env();
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WORKLOAD_SIGNIFICANT_CHANGE", "0");
        match AppConfig::load() {
            Err(ConfigError::NonPositive { key }) => {
                assert_eq!(key, "WORKLOAD_SIGNIFICANT_CHANGE")
            }
            other => panic!("expected non-positive error, got {other:?}"),
        }
        reset_env();
    }

    #[test]
    fn rejects_garbage_numbers() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("WORKLOAD_DEBOUNCE_MS", "soon");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidNumber { .. })
        ));
        reset_env();
    }
}
