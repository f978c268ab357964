// ==========================================
// 临床试验中心遴选与入组监测 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (量化核心, 人工最终控制权)
// 两阶段: (1) 多源属性综合评分遴选中心
//         (2) 在研试验入组监测 + 概率预测 + 干预评估
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AnomalyType, InterventionType, RoiLevel, Severity, SiteType};

// 领域实体
pub use domain::{
    AccessRecord, Anomaly, AnomalyReport, EnrollmentSnapshot, ForecastResult,
    InterventionEstimate, InterventionRequest, PerformanceRecord, Site, SiteAnalysisReport,
    SiteEnrollmentSummary, SiteScore, TrialMonitoringReport, WeeklyEnrollmentEvent,
};

// 引擎
pub use engine::{
    AnomalyDetector, EngineError, EngineResult, EnrollmentAggregator, MonitoringPipeline,
    MonteCarloForecaster, RoiEstimator, SiteScoringEngine,
};

// 配置
pub use config::{EngineConfig, ForecastConfig, MonitoringConfig, RoiConfig, ScoringConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "临床试验中心遴选与入组监测系统";
