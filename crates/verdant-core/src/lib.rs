//! Domain logic for the verdant garden service.
//!
//! [`insight`] is the scheduling/insight engine: pure functions from a
//! plant's recorded history to due dates, milestones and advisories.
//! [`input`] validates raw form values into typed persistence parameters,
//! [`export`] renders a plant's log as CSV, [`tags`] and [`catalog`] hold
//! the aggregation utilities used by the blog and storefront.

pub mod catalog;
pub mod export;
pub mod input;
pub mod insight;
pub mod tags;
