mod checkout_dto;

pub use checkout_dto::*;
