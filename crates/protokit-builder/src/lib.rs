//! # Protokit Builder
//!
//! Deterministic study protocol builders and the generator the host calls.
//!
//! A protocol builder maps a participant and their session history to a
//! [`ProtocolDocument`](protokit_common::ProtocolDocument): which frames exist
//! and the order a session shows them in.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │                ProtocolGenerator                   │
//! │  input checks ─► ProtocolBuilder ─► validate()     │
//! └──────────────────────────┬─────────────────────────┘
//!                            │
//!        ┌───────────────────┼────────────────────┐
//!        │                   │                    │
//!  ┌─────┴──────┐   ┌────────┴───────┐   ┌────────┴────────┐
//!  │EmptyProtocol│  │ StaticProtocol │   │ Fn(profile, …)  │
//!  │  (baseline) │  │ preset / file  │   │ custom branching│
//!  └─────────────┘  └────────────────┘   └─────────────────┘
//! ```

pub mod builder;
pub mod config;
pub mod generator;
pub mod presets;

// Re-export core types
pub use builder::{EmptyProtocol, ProtocolBuilder, StaticProtocol};
pub use config::GeneratorSettings;
pub use generator::{ProtocolGenerator, ProtocolRequest};
pub use presets::Preset;
