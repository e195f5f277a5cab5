use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Date, Float8};

use crate::api::DayRecord;

/// One row of a day-series read. `rate` is cast to `float8` in the query.
#[derive(Debug, Clone, QueryableByName)]
pub struct DayRow {
    #[diesel(sql_type = Date)]
    pub date: NaiveDate,
    #[diesel(sql_type = Bool)]
    pub is_booked: bool,
    #[diesel(sql_type = Float8)]
    pub rate: f64,
}

impl From<DayRow> for DayRecord {
    fn from(row: DayRow) -> Self {
        DayRecord::new(row.date, row.is_booked, row.rate)
    }
}
