pub mod boundary;
pub mod dto;
pub mod errors;
pub mod routes;
pub mod startup;
pub mod state;
pub mod validation;

pub use startup::run;
