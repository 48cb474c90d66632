//! Crew workload scoring and utilization balance engine.
//!
//! The [`workload`] module holds the engine itself: the metric catalog and
//! configuration model, the score calculator, the balance classifier, the
//! configuration change coordinator and the aggregation views built on top of
//! them. [`config`], [`error`] and [`telemetry`] carry the ambient plumbing
//! shared with the operator CLI.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workload;
