// ==========================================
// 临床试验DSS - 入组异常检测引擎
// ==========================================
// 职责: 各中心实际入组 vs 基准期望 → 分级告警
// 输入: EnrollmentSnapshot (聚合引擎输出)
// 输出: AnomalyReport (告警列表 + 分级计数)
// 红线: 每中心至多一条告警,停滞优先于不达标
// 红线: 所有告警必须输出可读 message
// ==========================================

use crate::config::MonitoringConfig;
use crate::domain::anomaly::{Anomaly, AnomalyReport};
use crate::domain::enrollment::EnrollmentSnapshot;
use crate::domain::types::{AnomalyType, Severity};
use std::collections::HashSet;
use tracing::info;

// ==========================================
// AnomalyDetector - 异常检测引擎
// ==========================================
pub struct AnomalyDetector {
    // 无状态引擎,不需要注入依赖
}

impl AnomalyDetector {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 检测入组异常
    ///
    /// # 判定顺序 (每中心首个命中即停)
    /// 1. 停滞 (critical): 中心在快照的停滞列表中
    /// 2. 不达标 (warning): 实际入组 < 比例 * 期望入组
    /// 3. 其余中心不产生告警
    ///
    /// 期望入组 = weeks_active * 基准周入组率
    ///
    /// # 参数
    /// - `snapshot`: 入组快照
    /// - `config`: 监测参数
    ///
    /// # 返回
    /// AnomalyReport; 告警顺序与快照中心顺序一致
    pub fn detect(&self, snapshot: &EnrollmentSnapshot, config: &MonitoringConfig) -> AnomalyReport {
        let flatlined: HashSet<&str> = snapshot
            .flatlined_sites
            .iter()
            .map(String::as_str)
            .collect();

        let mut anomalies = Vec::new();

        for summary in &snapshot.summaries {
            let expected = f64::from(summary.weeks_active) * config.expected_weekly_rate;
            let expected_int = expected as u32;

            // 1. 停滞优先
            if flatlined.contains(summary.site_id.as_str()) {
                anomalies.push(Anomaly {
                    site_id: summary.site_id.clone(),
                    anomaly_type: AnomalyType::Flatlined,
                    severity: Severity::Critical,
                    enrolled: summary.total_enrolled,
                    expected: expected_int,
                    message: format!(
                        "中心最近{}周入组为0",
                        config.flatline_window_weeks
                    ),
                });
                continue;
            }

            // 2. 不达标
            if f64::from(summary.total_enrolled) < expected * config.underperform_ratio {
                let shortfall = expected_int.saturating_sub(summary.total_enrolled);
                anomalies.push(Anomaly {
                    site_id: summary.site_id.clone(),
                    anomaly_type: AnomalyType::Underperforming,
                    severity: Severity::Warning,
                    enrolled: summary.total_enrolled,
                    expected: expected_int,
                    message: format!(
                        "中心实际入组{}人, 期望{}人 (缺口{}人)",
                        summary.total_enrolled, expected_int, shortfall
                    ),
                });
            }
        }

        let critical_count = anomalies
            .iter()
            .filter(|a| a.severity == Severity::Critical)
            .count();
        let warning_count = anomalies
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .count();

        info!(
            total = anomalies.len(),
            critical = critical_count,
            warning = warning_count,
            "异常检测完成"
        );

        AnomalyReport {
            total_anomalies: anomalies.len(),
            critical_count,
            warning_count,
            anomalies,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}
