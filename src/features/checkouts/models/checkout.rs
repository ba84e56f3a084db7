use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a checkout session
#[derive(Debug, Clone, FromRow)]
pub struct Checkout {
    pub id: i64,
    pub year_range: String,
    pub date: DateTime<Utc>,
    pub owner_name: String,
    pub email: String,
    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub needs_approval: bool,
    pub notes: Option<String>,
}

/// Data for creating a checkout session together with its items
#[derive(Debug, Clone)]
pub struct CreateCheckout {
    pub year_range: String,
    pub date: DateTime<Utc>,
    pub owner_name: String,
    pub email: String,
    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub needs_approval: bool,
    pub notes: Option<String>,
    pub items: Vec<super::CreateItem>,
}

/// Admin correction of owner/contact details. `None` leaves a column untouched.
#[derive(Debug, Clone, Default)]
pub struct ContactCorrection {
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub housing_assignment: Option<String>,
    pub graduation_year: Option<String>,
    pub notes: Option<String>,
}

impl ContactCorrection {
    pub fn is_empty(&self) -> bool {
        self.owner_name.is_none()
            && self.email.is_none()
            && self.housing_assignment.is_none()
            && self.graduation_year.is_none()
            && self.notes.is_none()
    }
}
