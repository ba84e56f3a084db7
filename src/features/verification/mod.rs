//! Reviewer queue for donated items.
//!
//! A session's status is never stored: it is derived from its items on every
//! read (any flagged item flags the session, all-approved approves it,
//! anything else is pending). Only sessions with `needs_approval` set are
//! ever listed.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/verification/checkouts` | Sessions under one status tab, with tab counts |
//! | PATCH | `/verification/checkouts/{id}` | Approve or flag every item of a session |
//! | GET | `/verification/items` | Items under one status tab |
//! | PATCH | `/verification/items/{id}` | Change one item's verification state |

pub mod aggregator;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::VerificationService;
