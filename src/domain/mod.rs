//! Domain entities exposed by the service layer.

pub mod announcement;
pub mod job;
pub mod product;
pub mod training;
pub mod user;
