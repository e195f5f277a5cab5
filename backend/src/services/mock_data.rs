//! Mock booking data for local development and database seeding.
//!
//! Each room gets one record per day starting today, a whole-number base
//! nightly rate in `[80, 200]` and a daily variation of `x[0.8, 1.2)`, rounded
//! to the nearest cent. About 60% of days are booked.

use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeSet;

use crate::api::{DayRecord, RoomId};
use crate::models::calendar;

const BASE_RATE_MIN: u32 = 80;
const BASE_RATE_MAX: u32 = 200;
const VARIATION_MIN: f64 = 0.8;
const VARIATION_SPAN: f64 = 0.4;
const BOOKING_PROBABILITY: f64 = 0.6;

/// Sizing for generated mock rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockDataConfig {
    /// Whether an in-memory store should be seeded at startup
    pub enabled: bool,
    /// Number of distinct rooms to generate
    pub room_count: usize,
    /// Calendar months of daily records per room
    pub months: u32,
}

impl Default for MockDataConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            room_count: 10,
            months: 7,
        }
    }
}

impl MockDataConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SEED_MOCK_DATA`: `true`/`false` (default: true)
    /// - `SEED_ROOM_COUNT`: rooms to generate (default: 10)
    /// - `SEED_MONTHS`: months of data per room (default: 7)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enabled = std::env::var("SEED_MOCK_DATA")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(defaults.enabled);

        let room_count = std::env::var("SEED_ROOM_COUNT")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(defaults.room_count);

        let months = std::env::var("SEED_MONTHS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.months);

        Self {
            enabled,
            room_count,
            months,
        }
    }
}

/// Random room identifier: one uppercase letter followed by three digits (`A123`).
pub fn generate_room_id<R: Rng + ?Sized>(rng: &mut R) -> RoomId {
    let letter = char::from(b'A' + rng.gen_range(0..26u8));
    let number = rng.gen_range(100..1000u32);
    RoomId::new(format!("{}{}", letter, number))
}

/// Whole-number nightly base rate in `[80, 200]`.
pub fn generate_base_rate<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(BASE_RATE_MIN..=BASE_RATE_MAX)
}

/// `base * variation` rounded to the nearest cent.
///
/// Stored rates are rounded, unlike the truncating `round2` used for analytics.
pub fn daily_rate(base: u32, variation: f64) -> f64 {
    (f64::from(base) * variation * 100.0).round() / 100.0
}

/// One record per day in `[start, start + months)`.
pub fn generate_day_series<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    months: u32,
) -> Vec<DayRecord> {
    let end = calendar::months_ahead(start, months);
    let base_rate = generate_base_rate(rng);

    start
        .iter_days()
        .take_while(|day| *day < end)
        .map(|day| {
            let variation = VARIATION_MIN + rng.gen::<f64>() * VARIATION_SPAN;
            let is_booked = rng.gen::<f64>() < BOOKING_PROBABILITY;
            DayRecord::new(day, is_booked, daily_rate(base_rate, variation))
        })
        .collect()
}

/// Generate `config.room_count` rooms with distinct identifiers.
pub fn generate_rooms<R: Rng + ?Sized>(
    rng: &mut R,
    config: &MockDataConfig,
    start: NaiveDate,
) -> Vec<(RoomId, Vec<DayRecord>)> {
    let mut seen = BTreeSet::new();
    let mut rooms = Vec::with_capacity(config.room_count);

    // 26 * 900 possible identifiers
    let room_count = config.room_count.min(26 * 900);
    while rooms.len() < room_count {
        let room_id = generate_room_id(rng);
        if !seen.insert(room_id.clone()) {
            continue;
        }
        let series = generate_day_series(rng, start, config.months);
        rooms.push((room_id, series));
    }

    rooms
}
