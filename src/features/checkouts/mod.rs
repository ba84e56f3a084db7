//! Checkout sessions and their items.
//!
//! A session bundles the items of one donation or checkout event. Sessions
//! recorded here use the bulk-import shape (`needs_approval = false`) and
//! never enter the review queue; donations go through `features::donations`.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/checkouts` | Record a session with its items |
//! | GET | `/api/checkouts/{id}` | Session with items and derived status |
//! | PATCH | `/api/checkouts/{id}` | Correct owner/contact details |
//! | PATCH | `/api/items/{id}` | Correct item name, quantity or description |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CheckoutService;
