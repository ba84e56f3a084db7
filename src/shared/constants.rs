/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// ACADEMIC YEAR
// =============================================================================

/// Month (1-based, chrono convention) on which a new academic year starts
pub const ACADEMIC_YEAR_START_MONTH: u32 = 8;

// =============================================================================
// VERIFICATION QUEUE
// =============================================================================

/// Widest approved window a request may ask for (ten years)
pub const MAX_APPROVED_WINDOW_DAYS: i64 = 3650;
