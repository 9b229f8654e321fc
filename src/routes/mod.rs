mod contact;
mod health_check;

pub use contact::{contact_health, handle_submit_contact, ContactError};
pub use health_check::health_check;
