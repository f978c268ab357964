// ==========================================
// 临床试验DSS - 引擎配置层
// ==========================================
// 职责: 集中定义各引擎的权重/阈值/模型参数
// 红线: 引擎内不得硬编码业务常数,一律从配置读取
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// ScoringConfig - 遴选评分参数
// ==========================================
/// 中心评分参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// 数据质量准入阈值,低于该值的中心不参与排名
    pub quality_threshold: f64,

    /// 综合评分权重: 绩效
    pub weight_performance: f64,
    /// 综合评分权重: 患者可及性
    pub weight_access: f64,
    /// 综合评分权重: 数据质量
    pub weight_quality: f64,
    /// 综合评分权重: 运营
    pub weight_logistics: f64,

    /// 患者密度归一化基数 (eligible_patients / 该值)
    pub patient_density_scale: f64,
    /// 竞争试验饱和数 (competing_trials / 该值,封顶1.0)
    pub competing_trials_saturation: f64,
    /// 首例入组耗时饱和天数
    pub days_to_first_patient_saturation: f64,
    /// 方案偏离饱和次数
    pub protocol_deviation_saturation: f64,

    /// 是否将患者密度项封顶到1.0
    ///
    /// 默认不封顶以对齐既有排名口径;需要严格[0,1]子分时显式开启
    pub clamp_patient_density: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quality_threshold: 0.65,
            weight_performance: 0.40,
            weight_access: 0.30,
            weight_quality: 0.20,
            weight_logistics: 0.10,
            patient_density_scale: 1000.0,
            competing_trials_saturation: 10.0,
            days_to_first_patient_saturation: 90.0,
            protocol_deviation_saturation: 10.0,
            clamp_patient_density: false,
        }
    }
}

// ==========================================
// MonitoringConfig - 监测/异常检测参数
// ==========================================
/// 入组监测参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// 基准健康周入组率 (期望入组 = weeks_active * 该值)
    pub expected_weekly_rate: f64,
    /// 不达标判定比例 (实际 < 比例 * 期望 => warning)
    pub underperform_ratio: f64,
    /// 停滞观察窗 (全局末 N 个周号)
    pub flatline_window_weeks: u32,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            expected_weekly_rate: 2.5,
            underperform_ratio: 0.5,
            flatline_window_weeks: 3,
        }
    }
}

// ==========================================
// ForecastConfig - 蒙特卡洛预测参数
// ==========================================
/// 入组预测参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// 剩余周数 (预测时域)
    pub weeks_remaining: u32,
    /// 入组目标
    pub target_enrollment: u32,
    /// 模拟次数
    pub n_simulations: u32,
    /// 周入组率扰动标准差 (零均值高斯)
    pub rate_noise_sigma: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            weeks_remaining: 39,
            target_enrollment: 200,
            n_simulations: 500,
            rate_noise_sigma: 0.3,
        }
    }
}

// ==========================================
// RoiConfig - 干预成本收益参数
// ==========================================
/// 干预评估参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiConfig {
    /// 效率阈值 (patients_per_dollar 超过该值才算划算)
    pub efficiency_threshold: f64,

    /// add_budget: 额外入组人数抽样区间 [min, max)
    pub budget_patients_min: i64,
    pub budget_patients_max: i64,

    /// replace_site: 固定成本与额外入组抽样区间 [min, max)
    pub replace_cost: i64,
    pub replace_patients_min: i64,
    pub replace_patients_max: i64,

    /// extend_duration: 每周额外入组与每周成本
    pub extend_patients_per_week: i64,
    pub extend_cost_per_week: i64,
}

impl Default for RoiConfig {
    fn default() -> Self {
        Self {
            efficiency_threshold: 0.0002,
            budget_patients_min: 10,
            budget_patients_max: 16,
            replace_cost: 100_000,
            replace_patients_min: 20,
            replace_patients_max: 31,
            extend_patients_per_week: 2,
            extend_cost_per_week: 5_000,
        }
    }
}

// ==========================================
// EngineConfig - 配置聚合根
// ==========================================
/// 全部引擎配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub monitoring: MonitoringConfig,
    pub forecast: ForecastConfig,
    pub roi: RoiConfig,
}

impl EngineConfig {
    /// 从 JSON 文件加载配置 (缺省字段回落到默认值)
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: EngineConfig = serde_json::from_str(&raw)
            .with_context(|| format!("解析配置文件失败: {}", path.display()))?;
        Ok(config)
    }
}
