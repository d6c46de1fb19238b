//! Data transfer objects handed to templates and the JSON API.

pub mod api;
pub mod pages;
