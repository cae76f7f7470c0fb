//! Utility modules

pub mod route;
