//! Umbra graph-computation core.
//!
//! Two tightly coupled subsystems: a strategy interception layer that lets
//! cross-cutting policies decorate graph-element operations without touching
//! the base graph implementation, and a partition-aware traversal optimizer
//! that decides whether a distributed execution pass may omit partition
//! metadata.

#![warn(missing_docs)]

pub mod model;
pub mod strategy;
pub mod traversal;
pub mod types;
