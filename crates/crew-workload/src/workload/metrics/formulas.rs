use crate::workload::domain::PeriodRecord;

type Accessor = fn(&PeriodRecord) -> f64;

static FORMULAS: &[(&str, Accessor)] = &[
    ("flight-hours", |record| record.flight_hours),
    ("flight-days", |record| f64::from(record.flight_days)),
    ("total-duty-days", |record| f64::from(record.total_duty_days())),
    ("total-rest-days", |record| f64::from(record.total_rest_days())),
    ("training-days", |record| f64::from(record.training_days)),
    ("weekend-days", |record| f64::from(record.weekend_days)),
    ("position-days", |record| f64::from(record.position_days)),
    ("stop-worked-days", |record| f64::from(record.stop_worked_days)),
    ("payback-stop-days", |record| f64::from(record.payback_stop_days)),
    ("vacation-days", |record| f64::from(record.vacation_days)),
    ("international-trips", |record| {
        f64::from(record.international_trips)
    }),
];

pub(super) fn lookup(formula: &str) -> Option<Accessor> {
    let formula = formula.trim();
    FORMULAS
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(formula))
        .map(|(_, accessor)| *accessor)
}

/// Formula ids a custom metric can reference.
pub fn known_formulas() -> impl Iterator<Item = &'static str> {
    FORMULAS.iter().map(|(id, _)| *id)
}
