// ==========================================
// 临床试验DSS - 监测流水线
// ==========================================
// 职责: 串联 聚合 → 异常检测 → 预测 三个引擎
// 输入: 周度入组事件日志 + 全量引擎配置 + 随机源
// 输出: TrialMonitoringReport
// 红线: 纯组合,不保留任何跨调用状态
// ==========================================

use crate::config::EngineConfig;
use crate::domain::enrollment::WeeklyEnrollmentEvent;
use crate::domain::report::TrialMonitoringReport;
use crate::engine::anomaly::AnomalyDetector;
use crate::engine::enrollment::EnrollmentAggregator;
use crate::engine::error::EngineResult;
use crate::engine::forecast::MonteCarloForecaster;
use chrono::Utc;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

// ==========================================
// MonitoringPipeline - 监测流水线
// ==========================================
pub struct MonitoringPipeline {
    aggregator: EnrollmentAggregator,
    detector: AnomalyDetector,
    forecaster: MonteCarloForecaster,
}

impl MonitoringPipeline {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            aggregator: EnrollmentAggregator::new(),
            detector: AnomalyDetector::new(),
            forecaster: MonteCarloForecaster::new(),
        }
    }

    /// 运行完整监测流程
    ///
    /// # 流程
    /// 1. 聚合事件日志 → 入组快照
    /// 2. 异常检测 → 告警报告
    /// 3. 蒙特卡洛预测 → 终态分布投影
    ///
    /// 任一阶段的输入形状错误即整体返回,不输出部分结果
    pub fn run<R: Rng + ?Sized>(
        &self,
        events: &[WeeklyEnrollmentEvent],
        config: &EngineConfig,
        rng: &mut R,
    ) -> EngineResult<TrialMonitoringReport> {
        let snapshot = self.aggregator.aggregate(events, &config.monitoring)?;
        let anomaly_report = self.detector.detect(&snapshot, &config.monitoring);
        let forecast = self
            .forecaster
            .forecast(&snapshot, &config.forecast, rng)?;

        info!(
            sites = snapshot.summaries.len(),
            anomalies = anomaly_report.total_anomalies,
            p50 = forecast.p50_final,
            "监测流水线完成"
        );

        Ok(TrialMonitoringReport {
            monitor_id: Uuid::new_v4().to_string(),
            snapshot,
            anomaly_report,
            forecast,
            generated_at: Utc::now(),
        })
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for MonitoringPipeline {
    fn default() -> Self {
        Self::new()
    }
}
