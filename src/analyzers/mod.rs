//! Route aggregation and price statistics.
//!
//! This module groups cleaned flight rows by route, computes mean prices,
//! buckets prices into a fixed-width histogram, and summarizes the dataset
//! for the dashboard header.

pub mod aggregate;
pub mod histogram;
pub mod types;
pub mod utility;
