mod checkout_service;
pub mod queries;

pub use checkout_service::{CheckoutService, CreatedCheckout};
