pub mod connection;
pub mod error_context;
pub mod executor;

pub use connection::{connect_to_database, mask_url_password};
pub use executor::apply_command;
