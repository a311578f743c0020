pub mod account;
#[cfg(feature = "server")]
pub mod auth;
#[cfg(feature = "server")]
pub mod config;
pub mod contact;
pub mod custom_field;
pub mod lead;
pub mod lead_event;
pub mod organization;
pub mod portal;
pub mod transaction;
pub mod user;
