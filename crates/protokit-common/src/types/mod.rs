//! Core data types for Protokit

pub mod document;
pub mod fingerprint;
pub mod frame;
pub mod participant;
pub mod session;
