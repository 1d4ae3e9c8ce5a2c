//! Conflict-checked task scheduling for a single day.
//!
//! The [`ScheduleManager`] admits tasks only when they do not overlap any
//! task it already holds, and tells its observers about every admission and
//! every rejection.

pub mod manager;

pub use manager::ScheduleManager;
