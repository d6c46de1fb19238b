//! Diesel models mirroring the domain entities.

pub mod announcement;
pub mod config;
pub mod job;
pub mod product;
pub mod training;
pub mod user;
