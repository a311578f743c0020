pub mod account;
pub mod contact;
pub mod custom_field;
pub mod lead;
pub mod lead_event;
pub mod organization;
pub mod portal;
pub mod transaction;
pub mod types;
pub mod user;
