// ==========================================
// 临床试验DSS - 引擎层
// ==========================================
// 职责: 实现评分/聚合/检测/预测/评估五个业务引擎
// 红线: 引擎无状态、无I/O; 输入不可变,输出新值对象
// 红线: 随机性一律通过注入的随机源,不使用全局生成器
// ==========================================

pub mod anomaly;
pub mod enrollment;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod roi;
pub mod scoring;

// 重导出核心引擎
pub use anomaly::AnomalyDetector;
pub use enrollment::EnrollmentAggregator;
pub use error::{EngineError, EngineResult};
pub use forecast::MonteCarloForecaster;
pub use pipeline::MonitoringPipeline;
pub use roi::RoiEstimator;
pub use scoring::SiteScoringEngine;
