//! Shared value types for `Dayplan`: minute-of-day times, tasks, and the
//! schedule events broadcast to observers.

pub mod event;
pub mod task;
pub mod time;

pub use event::ScheduleEvent;
pub use task::{Task, TaskError};
pub use time::{MINUTES_PER_DAY, MinuteOfDay};
