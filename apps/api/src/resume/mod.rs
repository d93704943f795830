// Resume wizard, validation and per-user persistence.

pub mod handlers;
pub mod store;
pub mod validation;
pub mod wizard;
