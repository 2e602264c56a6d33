//! CompliScore: rule-based compliance scoring for broker portfolios.
//!
//! Tables enter through [`intake`], are scored by [`scoring::ScoringEngine`]
//! and are summarized and exported by [`report`].

pub mod config;
pub mod error;
pub mod intake;
pub mod report;
pub mod scoring;
pub mod telemetry;
