pub mod contact_email;
pub mod contact_message;
pub mod contact_name;
pub mod submission;
