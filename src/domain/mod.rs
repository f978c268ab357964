// ==========================================
// 临床试验DSS - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象与类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod anomaly;
pub mod enrollment;
pub mod forecast;
pub mod intervention;
pub mod report;
pub mod score;
pub mod site;
pub mod types;

// 重导出核心类型
pub use anomaly::{Anomaly, AnomalyReport};
pub use enrollment::{EnrollmentSnapshot, SiteEnrollmentSummary, WeeklyEnrollmentEvent};
pub use forecast::ForecastResult;
pub use intervention::{InterventionEstimate, InterventionRequest};
pub use report::TrialMonitoringReport;
pub use score::{SiteAnalysisReport, SiteScore};
pub use site::{AccessRecord, PerformanceRecord, Site};
pub use types::{AnomalyType, InterventionType, RoiLevel, Severity, SiteType};
