//! Engine configuration management.

use serde::Deserialize;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct EngineConfig {
    /// Payment schedule configuration.
    #[serde(default)]
    pub schedule: ScheduleConfig,
    /// Overdue interest accrual configuration.
    #[serde(default)]
    pub accrual: AccrualConfig,
}

/// Payment schedule configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Days between contract approval and the reservation due date.
    #[serde(default = "default_reservation_offset_days")]
    pub reservation_offset_days: i64,
    /// Calendar months between consecutive scheduled payments.
    #[serde(default = "default_installment_interval_months")]
    pub installment_interval_months: u32,
}

fn default_reservation_offset_days() -> i64 {
    15
}

fn default_installment_interval_months() -> u32 {
    1
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            reservation_offset_days: default_reservation_offset_days(),
            installment_interval_months: default_installment_interval_months(),
        }
    }
}

/// Overdue interest accrual configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AccrualConfig {
    /// Days a payment may be overdue before interest starts accruing.
    #[serde(default = "default_grace_period_days")]
    pub grace_period_days: i64,
}

fn default_grace_period_days() -> i64 {
    1
}

impl Default for AccrualConfig {
    fn default() -> Self {
        Self {
            grace_period_days: default_grace_period_days(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("LOTFIN").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
