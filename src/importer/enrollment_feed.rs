// ==========================================
// 临床试验DSS - 入组馈送数据导入
// ==========================================
// 职责: weekly_enrollment_feed.csv 的解析
// 红线: 不强校验 enrolled <= screened (应成立但允许上游噪声)
// ==========================================

use crate::domain::enrollment::WeeklyEnrollmentEvent;
use crate::importer::error::ImportResult;
use crate::importer::read_csv;
use std::path::Path;
use tracing::info;

/// 装载周度入组馈送表
///
/// 列名与实体字段一致 (week / week_ending_date / site_id /
/// patients_screened / patients_enrolled / screen_fail_reasons),
/// 直接反序列化; 日期口径为 ISO 8601 (YYYY-MM-DD)
pub fn load_enrollment_feed(
    path: impl AsRef<Path>,
) -> ImportResult<Vec<WeeklyEnrollmentEvent>> {
    let events: Vec<WeeklyEnrollmentEvent> = read_csv(path.as_ref())?;
    info!(count = events.len(), "周度入组馈送装载完成");
    Ok(events)
}
