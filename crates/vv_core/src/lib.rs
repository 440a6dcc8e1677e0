pub mod domain;
pub mod error;
pub mod policy;
pub mod repair;
pub mod schema;
pub mod sources;
pub mod validate;
