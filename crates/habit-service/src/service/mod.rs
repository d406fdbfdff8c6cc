//! 业务服务层
//!
//! engine / badges / conflict 是纯函数，checkin 负责事务编排，
//! habits 负责习惯 CRUD 与冲突检测。

pub mod badges;
pub mod checkin;
pub mod conflict;
pub mod dto;
pub mod engine;
pub mod habits;

pub use checkin::CheckinService;
pub use habits::HabitService;
