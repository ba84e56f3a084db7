pub mod checkouts;
pub mod donations;
pub mod verification;
