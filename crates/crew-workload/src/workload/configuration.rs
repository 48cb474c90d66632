use super::metrics::{
    builtin_metrics, Metric, MetricCategory, MetricDraft, MetricKind, DUTY_HOURS, RON_DAYS,
    STANDBY_DAYS, TRIP_DAYS,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub const DEFAULT_CONFIGURATION_ID: &str = "default";

/// Rejected configuration edit. The configuration it was applied to is untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("metric name must not be empty")]
    EmptyName,
    #[error("metric '{metric}' needs a positive normalization cap (got {value})")]
    NonPositiveMaxValue { metric: String, value: f64 },
    #[error("metric '{metric}' needs a positive weight (got {value})")]
    NonPositiveWeight { metric: String, value: f64 },
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
    #[error("metric id '{0}' appears more than once")]
    DuplicateMetric(String),
}

/// One scoring policy: an ordered set of weighted metrics.
///
/// Every edit returns a new configuration; the receiver is never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl MetricConfiguration {
    /// The built-in catalog with every metric enabled at its default weight.
    pub fn default_at(created_at: DateTime<Utc>) -> Self {
        Self {
            id: DEFAULT_CONFIGURATION_ID.to_string(),
            name: "Default Configuration".to_string(),
            description: "Standard crew workload metrics".to_string(),
            metrics: builtin_metrics(),
            is_default: true,
            created_at,
            modified_at: created_at,
        }
    }

    pub fn metric(&self, metric_id: &str) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.id == metric_id)
    }

    pub fn enabled_metrics(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter().filter(|metric| metric.enabled)
    }

    pub fn total_enabled_weight(&self) -> f64 {
        self.enabled_metrics().map(|metric| metric.weight).sum()
    }

    /// Check a configuration that did not come through the edit API (e.g. a JSON file).
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for metric in &self.metrics {
            if !seen.insert(metric.id.as_str()) {
                return Err(ValidationError::DuplicateMetric(metric.id.clone()));
            }
            validate_metric_fields(&metric.id, &metric.name, metric.max_value, metric.weight)?;
        }
        Ok(())
    }

    pub fn add_custom_metric(
        &self,
        draft: MetricDraft,
        at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = draft.name.trim();
        validate_metric_fields(name, name, draft.max_value, draft.weight)?;

        let id = self.unique_metric_id(name);
        let kind = MetricKind::Custom(draft.formula.unwrap_or_else(|| id.clone()));
        let metric = Metric {
            id,
            name: name.to_string(),
            description: draft.description,
            category: MetricCategory::Custom,
            unit: draft.unit,
            max_value: draft.max_value,
            weight: draft.weight,
            enabled: true,
            kind,
        };

        let mut next = self.edited(at);
        next.metrics.push(metric);
        Ok(next)
    }

    /// Drop a metric; absent ids leave the metric set as is.
    pub fn remove_metric(&self, metric_id: &str, at: DateTime<Utc>) -> Self {
        let mut next = self.edited(at);
        next.metrics.retain(|metric| metric.id != metric_id);
        next
    }

    pub fn set_weight(
        &self,
        metric_id: &str,
        weight: f64,
        at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ValidationError::NonPositiveWeight {
                metric: metric_id.to_string(),
                value: weight,
            });
        }

        self.update_metric(metric_id, at, |metric| metric.weight = weight)
    }

    pub fn toggle_metric(&self, metric_id: &str, at: DateTime<Utc>) -> Result<Self, ValidationError> {
        self.update_metric(metric_id, at, |metric| metric.enabled = !metric.enabled)
    }

    /// Reweight the existing metrics to a preset pattern.
    pub fn apply_preset(&self, preset: Preset, at: DateTime<Utc>) -> Self {
        let mut next = self.edited(at);
        next.name = preset.label().to_string();
        next.description = preset.description().to_string();
        for metric in &mut next.metrics {
            metric.weight = preset.weight_for(&metric.id);
        }
        next
    }

    /// Persist the draft under a new identity, leaving `self` as it was.
    pub fn save_as(&self, name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: format!("config-{}", at.timestamp_millis()),
            name: name.into(),
            is_default: false,
            created_at: at,
            modified_at: at,
            ..self.clone()
        }
    }

    fn update_metric(
        &self,
        metric_id: &str,
        at: DateTime<Utc>,
        apply: impl FnOnce(&mut Metric),
    ) -> Result<Self, ValidationError> {
        let mut next = self.edited(at);
        let metric = next
            .metrics
            .iter_mut()
            .find(|metric| metric.id == metric_id)
            .ok_or_else(|| ValidationError::UnknownMetric(metric_id.to_string()))?;
        apply(metric);
        Ok(next)
    }

    fn edited(&self, at: DateTime<Utc>) -> Self {
        Self {
            modified_at: at,
            ..self.clone()
        }
    }

    fn unique_metric_id(&self, name: &str) -> String {
        let base = format!("custom-{}", slugify(name));
        if self.metric(&base).is_none() {
            return base;
        }

        (2..)
            .map(|suffix| format!("{base}-{suffix}"))
            .find(|candidate| self.metric(candidate).is_none())
            .unwrap_or(base)
    }
}

fn validate_metric_fields(
    metric: &str,
    name: &str,
    max_value: f64,
    weight: f64,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !max_value.is_finite() || max_value <= 0.0 {
        return Err(ValidationError::NonPositiveMaxValue {
            metric: metric.to_string(),
            value: max_value,
        });
    }
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ValidationError::NonPositiveWeight {
            metric: metric.to_string(),
            value: weight,
        });
    }
    Ok(())
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "metric".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Named reweighting patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    Balanced,
    DutyHeavy,
    #[serde(alias = "travel-focused")]
    FlightFocused,
    FatigueAware,
    Utilization,
}

impl Preset {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Balanced,
            Self::DutyHeavy,
            Self::FlightFocused,
            Self::FatigueAware,
            Self::Utilization,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Balanced => "balanced",
            Self::DutyHeavy => "duty-heavy",
            Self::FlightFocused => "flight-focused",
            Self::FatigueAware => "fatigue-aware",
            Self::Utilization => "utilization",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Balanced => "Balanced Configuration",
            Self::DutyHeavy => "Duty-Heavy Configuration",
            Self::FlightFocused => "Flight-focused Configuration",
            Self::FatigueAware => "Fatigue Management",
            Self::Utilization => "Utilization Focused",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Balanced => "Equal weight across all metrics",
            Self::DutyHeavy => "Emphasizes duty hours and standby time",
            Self::FlightFocused => "Emphasizes trip days and RON considerations",
            Self::FatigueAware => "Focuses on fatigue-inducing metrics",
            Self::Utilization => "Maximizes crew utilization metrics",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "balanced" => Some(Self::Balanced),
            "duty-heavy" => Some(Self::DutyHeavy),
            "flight-focused" | "travel-focused" => Some(Self::FlightFocused),
            "fatigue-aware" => Some(Self::FatigueAware),
            "utilization" => Some(Self::Utilization),
            _ => None,
        }
    }

    /// Weight the preset assigns to a metric; unnamed metrics get the fallback.
    pub fn weight_for(self, metric_id: &str) -> f64 {
        let (named, fallback): (&[(&str, f64)], f64) = match self {
            Self::Balanced => (&[], 5.0),
            Self::DutyHeavy => (
                &[
                    (DUTY_HOURS, 12.0),
                    (STANDBY_DAYS, 8.0),
                    (TRIP_DAYS, 4.0),
                    (RON_DAYS, 3.0),
                ],
                5.0,
            ),
            Self::FlightFocused => (&[(TRIP_DAYS, 15.0), (RON_DAYS, 10.0), (DUTY_HOURS, 5.0)], 3.0),
            Self::FatigueAware => (
                &[(RON_DAYS, 15.0), (DUTY_HOURS, 12.0), (STANDBY_DAYS, 8.0)],
                4.0,
            ),
            Self::Utilization => (&[(TRIP_DAYS, 20.0), (DUTY_HOURS, 15.0)], 2.0),
        };

        named
            .iter()
            .find(|(id, _)| *id == metric_id)
            .map(|(_, weight)| *weight)
            .unwrap_or(fallback)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Load/save boundary for named configurations.
pub trait ConfigurationStore: Send + Sync {
    fn save(&self, configuration: MetricConfiguration) -> Result<(), StoreError>;
    fn load(&self, id: &str) -> Result<Option<MetricConfiguration>, StoreError>;
    fn list(&self) -> Result<Vec<MetricConfiguration>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("configuration '{0}' already saved; saved configurations are immutable")]
    Conflict(String),
    #[error("configuration store unavailable: {0}")]
    Unavailable(String),
}
