use chrono::{DateTime, Datelike, Utc};

use crate::shared::constants::ACADEMIC_YEAR_START_MONTH;

/// Academic year label (`"2025-2026"`) containing `now`.
///
/// The year rolls over on the first of August: July 2026 still belongs to
/// `2025-2026`, August 2026 starts `2026-2027`.
pub fn academic_year_range(now: DateTime<Utc>) -> String {
    let year = now.year();
    if now.month() >= ACADEMIC_YEAR_START_MONTH {
        format!("{}-{}", year, year + 1)
    } else {
        format!("{}-{}", year - 1, year)
    }
}
