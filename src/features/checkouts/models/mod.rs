mod checkout;
mod item;
mod verification_status;

pub use checkout::{Checkout, ContactCorrection, CreateCheckout};
pub use item::{CreateItem, Item, ItemCorrection};
pub use verification_status::{ReviewDecision, VerificationStatus};
