//! Seasonal, weekday and holiday multipliers.

use chrono::{Datelike, NaiveDate, Weekday};

/// Month seasonality multipliers, January first. Summer (school-break
/// moving season) and the festive year-end carry a premium.
const MONTH_FACTORS: [f64; 12] = [
    1.0,  // Jan
    1.0,  // Feb
    1.05, // Mar
    1.0,  // Apr
    1.15, // May
    1.15, // Jun
    1.1,  // Jul
    1.0,  // Aug
    1.0,  // Sep
    1.05, // Oct
    1.1,  // Nov
    1.1,  // Dec
];

/// Fixed public-holiday calendar as (month, day).
const HOLIDAYS: &[(u32, u32)] = &[
    (1, 26),  // Republic Day
    (5, 1),   // Labour Day
    (8, 15),  // Independence Day
    (10, 2),  // Gandhi Jayanti
    (12, 25), // Christmas
];

/// Extra multiplier applied on top of the month and weekday factors when
/// the move date falls on a public holiday.
const HOLIDAY_FACTOR: f64 = 1.25;

/// Whether the date matches the fixed holiday calendar.
pub fn is_public_holiday(date: NaiveDate) -> bool {
    HOLIDAYS.contains(&(date.month(), date.day()))
}

fn weekday_factor(weekday: Weekday) -> f64 {
    match weekday {
        Weekday::Sat => 1.2,
        Weekday::Sun => 1.15,
        Weekday::Fri => 1.05,
        _ => 1.0,
    }
}

/// Combined time factor: month seasonality × weekday × holiday.
///
/// The holiday factor is multiplicative on top of the other two, not a
/// replacement for them.
pub fn time_factor(date: NaiveDate) -> f64 {
    let month = MONTH_FACTORS[date.month0() as usize];
    let weekday = weekday_factor(date.weekday());
    let holiday = if is_public_holiday(date) {
        HOLIDAY_FACTOR
    } else {
        1.0
    };
    month * weekday * holiday
}
