// ==========================================
// 临床试验DSS - 监测报告封装
// ==========================================
// 职责: 定义试验监测阶段的汇总报告
// ==========================================

use crate::domain::anomaly::AnomalyReport;
use crate::domain::enrollment::EnrollmentSnapshot;
use crate::domain::forecast::ForecastResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// TrialMonitoringReport - 监测报告
// ==========================================
/// 试验监测报告: 聚合快照 + 异常 + 预测
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialMonitoringReport {
    /// 监测批次ID
    pub monitor_id: String,
    /// 入组快照
    pub snapshot: EnrollmentSnapshot,
    /// 异常检测报告
    pub anomaly_report: AnomalyReport,
    /// 入组预测
    pub forecast: ForecastResult,
    pub generated_at: DateTime<Utc>,
}
