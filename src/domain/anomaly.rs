// ==========================================
// 临床试验DSS - 异常告警对象
// ==========================================
// 职责: 定义入组异常与异常报告
// 红线: 异常为瞬态输出,不落库
// ==========================================

use crate::domain::types::{AnomalyType, Severity};
use serde::{Deserialize, Serialize};

// ==========================================
// Anomaly - 单中心异常
// ==========================================
/// 单中心入组异常
///
/// 每中心至多一条: flatlined 优先于 underperforming
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub site_id: String,
    pub anomaly_type: AnomalyType,
    pub severity: Severity,
    /// 实际累计入组
    pub enrolled: u32,
    /// 期望累计入组 (weeks_active * 基准周入组率,取整)
    pub expected: u32,
    /// 可读告警信息
    pub message: String,
}

// ==========================================
// AnomalyReport - 异常报告
// ==========================================
/// 异常检测报告,附带预聚合计数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub total_anomalies: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    /// 异常列表 (保持输入中心顺序)
    pub anomalies: Vec<Anomaly>,
}
