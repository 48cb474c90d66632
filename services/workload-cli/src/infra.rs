use crew_workload::error::AppError;
use crew_workload::workload::{
    BalanceFilter, BalanceSort, ConfigurationStore, CrewPosition, CrewSnapshot, CrewStatus,
    MetricConfiguration, Period, PeriodRecord, Preset, RosterImporter, StoreError,
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Saved configurations as one pretty-printed JSON file per id.
#[derive(Debug, Clone)]
pub(crate) struct FileConfigurationStore {
    root: PathBuf,
}

impl FileConfigurationStore {
    pub(crate) fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl ConfigurationStore for FileConfigurationStore {
    fn save(&self, configuration: MetricConfiguration) -> Result<(), StoreError> {
        let path = self.path_for(&configuration.id);
        if path.exists() {
            return Err(StoreError::Conflict(configuration.id));
        }

        fs::create_dir_all(&self.root).map_err(unavailable)?;
        let json = serde_json::to_string_pretty(&configuration).map_err(unavailable)?;
        fs::write(&path, json).map_err(unavailable)?;
        debug!(configuration_id = %configuration.id, path = %path.display(), "configuration saved");
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<MetricConfiguration>, StoreError> {
        match fs::read_to_string(self.path_for(id)) {
            Ok(raw) => serde_json::from_str(&raw).map(Some).map_err(unavailable),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(unavailable(err)),
        }
    }

    fn list(&self) -> Result<Vec<MetricConfiguration>, StoreError> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(unavailable(err)),
        };

        let mut configurations: Vec<MetricConfiguration> = Vec::new();
        for entry in entries {
            let path = entry.map_err(unavailable)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let raw = fs::read_to_string(&path).map_err(unavailable)?;
            configurations.push(serde_json::from_str(&raw).map_err(unavailable)?);
        }
        configurations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(configurations)
    }
}

fn unavailable(err: impl std::fmt::Display) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Resolve `--config`: an existing JSON file wins over a store id.
pub(crate) fn load_configuration(
    reference: Option<&str>,
    store: &dyn ConfigurationStore,
) -> Result<Option<MetricConfiguration>, AppError> {
    let Some(reference) = reference else {
        return Ok(None);
    };

    let path = Path::new(reference);
    let configuration = if path.is_file() {
        let raw = fs::read_to_string(path)?;
        serde_json::from_str::<MetricConfiguration>(&raw)?
    } else {
        store.load(reference)?.ok_or_else(|| {
            AppError::Usage(format!(
                "no configuration file or saved configuration named '{reference}'"
            ))
        })?
    };

    configuration.validate()?;
    Ok(Some(configuration))
}

pub(crate) fn load_roster(path: Option<&Path>) -> Result<(Vec<CrewSnapshot>, bool), AppError> {
    match path {
        Some(path) => Ok((RosterImporter::from_path(path)?, true)),
        None => Ok((sample_roster(), false)),
    }
}

pub(crate) fn parse_period(raw: &str) -> Result<Period, String> {
    Period::parse(raw).ok_or_else(|| {
        format!("unknown period '{raw}' (expected previous, current, next or twoMonthsOut)")
    })
}

pub(crate) fn parse_preset(raw: &str) -> Result<Preset, String> {
    Preset::parse(raw).ok_or_else(|| {
        let known: Vec<&str> = Preset::ordered().iter().map(|preset| preset.key()).collect();
        format!("unknown preset '{raw}' (expected one of {})", known.join(", "))
    })
}

pub(crate) fn parse_filter(raw: &str) -> Result<BalanceFilter, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "all" => Ok(BalanceFilter::All),
        "over" => Ok(BalanceFilter::Over),
        "under" => Ok(BalanceFilter::Under),
        _ => Err(format!("unknown filter '{raw}' (expected all, over or under)")),
    }
}

pub(crate) fn parse_sort(raw: &str) -> Result<BalanceSort, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "overutilized" | "over" => Ok(BalanceSort::Overutilized),
        "underutilized" | "under" => Ok(BalanceSort::Underutilized),
        "name" => Ok(BalanceSort::Name),
        _ => Err(format!(
            "unknown sort '{raw}' (expected overutilized, underutilized or name)"
        )),
    }
}

pub(crate) fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    let (metric, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected METRIC_ID=WEIGHT, got '{raw}'"))?;
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse weight in '{raw}' ({err})"))?;
    Ok((metric.trim().to_string(), weight))
}

/// Small fleet used when no roster export is supplied.
pub(crate) fn sample_roster() -> Vec<CrewSnapshot> {
    let member = |id: &str,
                  name: &str,
                  position: CrewPosition,
                  base: &str,
                  periods: [(u32, f64, u32, u32); 4]| {
        let mut snapshot = CrewSnapshot::new(id, name, position, base);
        for (period, (trip_days, duty_hours, ron_days, standby_days)) in
            Period::ordered().into_iter().zip(periods)
        {
            snapshot = snapshot.with_period(
                period,
                PeriodRecord {
                    trip_days,
                    duty_hours,
                    ron_days,
                    standby_days,
                    flight_hours: duty_hours * 0.7,
                    off_days: 30u32.saturating_sub(trip_days + standby_days),
                    ..PeriodRecord::default()
                },
            );
        }
        snapshot
    };

    let mut roster = vec![
        member(
            "EMP001",
            "Sarah Johnson",
            CrewPosition::Captain,
            "LAX",
            [(12, 86.0, 4, 2), (14, 98.0, 5, 2), (15, 105.0, 6, 1), (11, 80.0, 4, 3)],
        ),
        member(
            "EMP002",
            "Michael Chen",
            CrewPosition::FirstOfficer,
            "JFK",
            [(9, 62.0, 2, 4), (8, 56.0, 2, 4), (10, 70.0, 3, 2), (9, 64.0, 3, 3)],
        ),
        member(
            "EMP003",
            "Emily Davis",
            CrewPosition::FlightAttendant,
            "MIA",
            [(10, 70.0, 3, 2), (10, 72.0, 3, 2), (10, 70.0, 3, 2), (10, 70.0, 3, 2)],
        ),
        member(
            "EMP004",
            "David Wilson",
            CrewPosition::Captain,
            "DFW",
            [(18, 110.0, 8, 1), (20, 118.0, 9, 1), (16, 112.0, 6, 2), (14, 96.0, 5, 2)],
        ),
        member(
            "EMP005",
            "Lisa Anderson",
            CrewPosition::FlightAttendant,
            "ORD",
            [(6, 40.0, 1, 6), (6, 42.0, 1, 7), (8, 55.0, 2, 5), (9, 60.0, 2, 4)],
        ),
        member(
            "EMP006",
            "James Martinez",
            CrewPosition::FirstOfficer,
            "SEA",
            [(4, 28.0, 0, 2), (3, 21.0, 0, 8), (5, 35.0, 1, 6), (7, 49.0, 2, 4)],
        ),
    ];

    if let Some(reserve) = roster.last_mut() {
        reserve.status = CrewStatus::Reserve;
        reserve.exclude_from_metrics = true;
    }
    roster
}
