// ==========================================
// 临床试验DSS - 入组数据实体
// ==========================================
// 职责: 定义周度入组事件与聚合汇总对象
// 红线: 事件为不可变日志,汇总每次从日志重算
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WeeklyEnrollmentEvent - 周度入组事件
// ==========================================
/// 周度入组事件(weekly_enrollment_feed 表,每中心每周一行)
///
/// 按周号升序排列; enrolled <= screened 应当成立但不做强校验
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyEnrollmentEvent {
    /// 周号 (从1开始)
    pub week: u32,
    /// 周截止日期
    pub week_ending_date: NaiveDate,
    pub site_id: String,
    /// 当周筛选人数
    pub patients_screened: u32,
    /// 当周入组人数
    pub patients_enrolled: u32,
    /// 筛选失败原因 (自由文本,分号分隔)
    pub screen_fail_reasons: String,
}

// ==========================================
// SiteEnrollmentSummary - 单中心入组汇总
// ==========================================
/// 单中心入组汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEnrollmentSummary {
    pub site_id: String,
    /// 累计筛选人数
    pub total_screened: u32,
    /// 累计入组人数
    pub total_enrolled: u32,
    /// 活跃周数 = 该中心出现过的最大周号 (不是周计数)
    pub weeks_active: u32,
    /// 最近观察窗(全局末3周)内入组人数
    pub recent_enrolled: u32,
}

// ==========================================
// EnrollmentSnapshot - 全试验入组快照
// ==========================================
/// 入组快照: 聚合引擎的完整输出
///
/// `summaries` 保持事件日志中中心首次出现的顺序,
/// 下游异常检测依赖该顺序保证输出稳定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentSnapshot {
    /// 数据集最大周号
    pub latest_week: u32,
    /// 各中心汇总
    pub summaries: Vec<SiteEnrollmentSummary>,
    /// 停滞中心列表 (观察窗内有记录但入组为0)
    pub flatlined_sites: Vec<String>,
}

impl EnrollmentSnapshot {
    /// 全试验累计入组人数
    pub fn total_enrolled(&self) -> u32 {
        self.summaries.iter().map(|s| s.total_enrolled).sum()
    }

    /// 全试验累计筛选人数
    pub fn total_screened(&self) -> u32 {
        self.summaries.iter().map(|s| s.total_screened).sum()
    }
}
