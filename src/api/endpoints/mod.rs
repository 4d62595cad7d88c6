//! API endpoint handlers, one module per screen group.

pub mod doctors;
pub mod health;
pub mod options;
pub mod workers;
