//! `Dayplan` — a conflict-checked day scheduler with observer notifications.

pub mod config;
pub mod observer;
pub mod schedule;

pub use dayplan_proto::{MinuteOfDay, ScheduleEvent, Task, TaskError};
pub use observer::{Observer, ObserverChannel, ObserverError};
pub use schedule::ScheduleManager;
