//! AI 周报教练
//!
//! 汇总用户最近 7 天的打卡活动，交给外部 LLM 生成一段激励性的
//! 周总结。client 负责 HTTP 调用，prompt 负责文案组装。

mod client;
mod prompt;
mod service;

pub use client::CoachClient;
pub use service::CoachService;
