//! Donation intake from the product form.
//!
//! Each submission becomes one checkout session with a single pending item,
//! flagged for review and stamped with the current academic year.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/products` | Log a donated item |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::DonationService;
