//! Value Object Module

pub mod did;
pub mod email;
