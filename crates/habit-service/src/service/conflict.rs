//! 提醒时间与课程表的冲突检测
//!
//! 时间统一为零填充 "HH:mm"，该格式下字典序与时间序一致，
//! 区间判定 [start, end) 直接用字符串比较完成。

use crate::models::ClassSchedule;

/// 提醒时间是否落在某节课内，区间左闭右开
pub fn reminder_overlaps(reminder: &str, start: &str, end: &str) -> bool {
    start <= reminder && reminder < end
}

/// 在给定课程中找出与提醒冲突的第一节课
///
/// frequency 里的每个星期几都要查；课程已按用户和星期预过滤。
pub fn find_conflict<'a>(
    reminder: &str,
    frequency: &[String],
    schedules: &'a [ClassSchedule],
) -> Option<&'a ClassSchedule> {
    schedules.iter().find(|class| {
        frequency.contains(&class.day)
            && reminder_overlaps(reminder, &class.start_time, &class.end_time)
    })
}

/// "HH:mm" 格式校验：两位小时 + 冒号 + 两位分钟，且数值合法
pub fn is_valid_time(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    let (hh, mm) = (&value[..2], &value[3..]);
    match (hh.parse::<u32>(), mm.parse::<u32>()) {
        (Ok(h), Ok(m)) => h < 24 && m < 60,
        _ => false,
    }
}
