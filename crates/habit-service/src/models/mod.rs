//! 数据模型定义
//!
//! 与数据库表一一对应的实体类型，以及徽章等枚举。

mod badge;
mod habit;
mod profile;
mod progress;
mod schedule;

pub use badge::{AwardedBadge, BadgeName};
pub use habit::{Habit, WEEKDAYS, is_weekday_name};
pub use profile::Profile;
pub use progress::ProgressEntry;
pub use schedule::ClassSchedule;
