//! Roster import from a CSV export.
//!
//! One row per crew member per period. Identity columns (name, position,
//! base, status, exclusion flag) are taken from the first row seen for a crew
//! id; later rows only contribute period data. Blank numeric cells read as 0.

use super::domain::{CrewId, CrewPosition, CrewSnapshot, CrewStatus, Period, PeriodRecord};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use std::path::Path;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    UnknownPeriod { row: usize, value: String },
    UnknownPosition { row: usize, value: String },
    UnknownStatus { row: usize, value: String },
}

impl fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {err}"),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {err}"),
            RosterImportError::UnknownPeriod { row, value } => {
                write!(f, "row {row}: unknown period '{value}'")
            }
            RosterImportError::UnknownPosition { row, value } => {
                write!(f, "row {row}: unknown crew position '{value}'")
            }
            RosterImportError::UnknownStatus { row, value } => {
                write!(f, "row {row}: unknown crew status '{value}'")
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CrewSnapshot>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Crew are returned in the order their id first appears.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CrewSnapshot>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut order: Vec<CrewId> = Vec::new();
        let mut crew: BTreeMap<CrewId, CrewSnapshot> = BTreeMap::new();

        for (index, row) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = row?;
            // Header is line 1.
            let line = index + 2;
            let period = Period::parse(&row.period).ok_or_else(|| {
                RosterImportError::UnknownPeriod {
                    row: line,
                    value: row.period.clone(),
                }
            })?;

            let id = CrewId::new(row.crew_id.clone());
            if !crew.contains_key(&id) {
                let snapshot = row.identity(line)?;
                order.push(id.clone());
                crew.insert(id.clone(), snapshot);
            }

            if let Some(snapshot) = crew.get_mut(&id) {
                snapshot.refresh_period(period, row.record());
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|id| crew.remove(&id))
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    crew_id: String,
    name: String,
    position: String,
    #[serde(default)]
    base: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    status: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    exclude_from_metrics: bool,
    period: String,
    #[serde(default, deserialize_with = "count")]
    flight_days: u32,
    #[serde(default, deserialize_with = "count")]
    trip_days: u32,
    #[serde(default, deserialize_with = "count")]
    trips: u32,
    #[serde(default, deserialize_with = "count")]
    international_trips: u32,
    #[serde(default, deserialize_with = "count")]
    ron_days: u32,
    #[serde(default, deserialize_with = "count")]
    position_days: u32,
    #[serde(default, deserialize_with = "count")]
    weekend_days: u32,
    #[serde(default, deserialize_with = "count")]
    standby_days: u32,
    #[serde(default, deserialize_with = "count")]
    misc_duty: u32,
    #[serde(default, deserialize_with = "count")]
    training_days: u32,
    #[serde(default, deserialize_with = "count")]
    other_duty_days: u32,
    #[serde(default, deserialize_with = "count")]
    stop_scheduled: u32,
    #[serde(default, deserialize_with = "count")]
    stop_worked_days: u32,
    #[serde(default, deserialize_with = "count")]
    payback_stop_days: u32,
    #[serde(default, deserialize_with = "count")]
    vacation_days: u32,
    #[serde(default, deserialize_with = "count")]
    misc_off_days: u32,
    #[serde(default, deserialize_with = "count")]
    off_days: u32,
    #[serde(default, deserialize_with = "count")]
    unscheduled_available: u32,
    #[serde(default, deserialize_with = "count")]
    scheduled_trips: u32,
    #[serde(default, deserialize_with = "hours")]
    duty_hours: f64,
    #[serde(default, deserialize_with = "hours")]
    flight_hours: f64,
}

impl RosterRow {
    fn identity(&self, line: usize) -> Result<CrewSnapshot, RosterImportError> {
        let position =
            CrewPosition::parse(&self.position).ok_or_else(|| RosterImportError::UnknownPosition {
                row: line,
                value: self.position.clone(),
            })?;

        let status = match self.status.as_deref() {
            None => CrewStatus::Active,
            Some(raw) => CrewStatus::parse(raw).ok_or_else(|| RosterImportError::UnknownStatus {
                row: line,
                value: raw.to_string(),
            })?,
        };

        let mut snapshot =
            CrewSnapshot::new(self.crew_id.clone(), self.name.clone(), position, self.base.clone());
        snapshot.status = status;
        snapshot.exclude_from_metrics = self.exclude_from_metrics;
        Ok(snapshot)
    }

    fn record(&self) -> PeriodRecord {
        PeriodRecord {
            flight_days: self.flight_days,
            trip_days: self.trip_days,
            trips: self.trips,
            international_trips: self.international_trips,
            ron_days: self.ron_days,
            position_days: self.position_days,
            weekend_days: self.weekend_days,
            standby_days: self.standby_days,
            misc_duty: self.misc_duty,
            training_days: self.training_days,
            other_duty_days: self.other_duty_days,
            stop_scheduled: self.stop_scheduled,
            stop_worked_days: self.stop_worked_days,
            payback_stop_days: self.payback_stop_days,
            vacation_days: self.vacation_days,
            misc_off_days: self.misc_off_days,
            off_days: self.off_days,
            unscheduled_available: self.unscheduled_available,
            scheduled_trips: self.scheduled_trips,
            duty_hours: self.duty_hours,
            flight_hours: self.flight_hours,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not a day count"))),
    }
}

fn hours<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match empty_string_as_none(deserializer)? {
        None => Ok(0.0),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("'{raw}' is not an hour total"))),
    }
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = empty_string_as_none(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(|value| value.trim().to_ascii_lowercase()).as_deref(),
        Some("true" | "yes" | "y" | "1" | "x")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "crew_id,name,position,base,status,exclude_from_metrics,period,trip_days,ron_days,standby_days,training_days,duty_hours,flight_hours\n";

    #[test]
    fn groups_rows_by_crew_id_in_first_seen_order() {
        let csv = format!(
            "{HEADER}\
c-2,Sarah Johnson,Captain,LAX,active,,current,14,5,2,1,98.5,70\n\
c-1,Michael Chen,First Officer,JFK,reserve,yes,current,8,2,4,,60,41.5\n\
c-2,Sarah Johnson,Captain,LAX,active,,next,12,4,1,0,90,\n"
        );

        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id.as_str(), "c-2");
        assert_eq!(roster[0].trip_days(Period::Current), 14);
        assert_eq!(roster[0].trip_days(Period::Next), 12);
        let next = roster[0].period(Period::Next).expect("next period present");
        assert_eq!(next.flight_hours, 0.0);

        assert_eq!(roster[1].position, CrewPosition::FirstOfficer);
        assert_eq!(roster[1].status, CrewStatus::Reserve);
        assert!(roster[1].exclude_from_metrics);
        let current = roster[1].period(Period::Current).expect("current period present");
        assert_eq!(current.training_days, 0);
        assert_eq!(current.duty_hours, 60.0);
    }

    #[test]
    fn blank_status_defaults_to_active() {
        let csv = format!("{HEADER}c-3,Emily Davis,FA,MIA,,,current,10,3,2,0,80,55\n");
        let roster = RosterImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(roster[0].status, CrewStatus::Active);
        assert!(!roster[0].exclude_from_metrics);
    }

    #[test]
    fn rejects_unknown_period() {
        let csv = format!("{HEADER}c-4,David Wilson,Captain,DFW,active,,last-year,10,3,2,0,80,55\n");
        match RosterImporter::from_reader(Cursor::new(csv)) {
            Err(RosterImportError::UnknownPeriod { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "last-year");
            }
            other => panic!("expected unknown period, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_counts() {
        let csv = format!("{HEADER}c-5,Lisa Anderson,Captain,ORD,active,,current,ten,3,2,0,80,55\n");
        assert!(matches!(
            RosterImporter::from_reader(Cursor::new(csv)),
            Err(RosterImportError::Csv(_))
        ));
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match RosterImporter::from_path("./does-not-exist.csv") {
            Err(RosterImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
