//! 数据访问层
//!
//! 每张表一个仓储，池方法服务于普通查询，`*_in_tx` 静态方法服务于
//! 打卡事务等需要共享同一连接的场景。

mod badge_repo;
mod habit_repo;
mod profile_repo;
mod progress_repo;
mod schedule_repo;
pub mod traits;

pub use badge_repo::BadgeRepository;
pub use habit_repo::HabitRepository;
pub use profile_repo::ProfileRepository;
pub use progress_repo::ProgressRepository;
pub use schedule_repo::{NewScheduleEntry, ScheduleRepository};
