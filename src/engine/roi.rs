// ==========================================
// 临床试验DSS - 干预ROI评估引擎
// ==========================================
// 职责: 离散干预类型的简化成本收益测算
// 输入: InterventionRequest + 评估参数 + 注入的随机源
// 输出: InterventionEstimate (成本/额外入组/效率/评级/建议)
// 红线: 启发式口径,不是校准统计模型
// 红线: 未识别类型返回结构化错误,不panic
// ==========================================

use crate::config::RoiConfig;
use crate::domain::intervention::{InterventionEstimate, InterventionRequest};
use crate::domain::types::{InterventionType, RoiLevel};
use crate::engine::error::{EngineError, EngineResult};
use rand::Rng;
use tracing::info;

// ==========================================
// RoiEstimator - 干预评估引擎
// ==========================================
pub struct RoiEstimator {
    // 无状态引擎,不需要注入依赖
}

impl RoiEstimator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 解析原始干预请求
    ///
    /// # 参数
    /// - `site_id`: 目标中心
    /// - `intervention_type`: 类型字符串 (add_budget / replace_site / extend_duration)
    /// - `amount`: 预算美元数或延长周数
    ///
    /// # 错误
    /// - `UnrecognizedIntervention`: 类型字符串未识别 (调用方输入错误,非系统故障)
    pub fn parse_request(
        &self,
        site_id: &str,
        intervention_type: &str,
        amount: i64,
    ) -> EngineResult<InterventionRequest> {
        let parsed = InterventionType::parse(intervention_type).ok_or_else(|| {
            EngineError::UnrecognizedIntervention {
                given: intervention_type.to_string(),
            }
        })?;
        Ok(InterventionRequest {
            site_id: site_id.to_string(),
            intervention_type: parsed,
            amount,
        })
    }

    /// 评估单个干预的成本收益
    ///
    /// # 口径 (每类型固定启发式)
    /// - add_budget: 额外入组抽样于 [min,max),成本=预算;效率超阈值为 good,否则 poor
    /// - replace_site: 额外入组抽样于 [min,max),成本固定;效率超阈值为 excellent,否则 good
    /// - extend_duration: 额外入组=周数*每周入组,成本=周数*每周成本;恒为 good
    ///
    /// # 参数
    /// - `request`: 干预请求
    /// - `config`: 评估参数
    /// - `rng`: 随机源 (额外入组区间抽样)
    pub fn estimate<R: Rng + ?Sized>(
        &self,
        request: &InterventionRequest,
        config: &RoiConfig,
        rng: &mut R,
    ) -> EngineResult<InterventionEstimate> {
        let (cost, additional_patients, assessment) = match request.intervention_type {
            InterventionType::AddBudget => {
                Self::ensure_positive_amount(request.amount, "预算金额")?;
                let patients =
                    rng.gen_range(config.budget_patients_min..config.budget_patients_max);
                let cost = request.amount;
                let level = if efficiency(patients, cost) > config.efficiency_threshold {
                    RoiLevel::Good
                } else {
                    RoiLevel::Poor
                };
                (cost, patients, level)
            }
            InterventionType::ReplaceSite => {
                // 更换中心成本固定,与请求金额无关
                let patients =
                    rng.gen_range(config.replace_patients_min..config.replace_patients_max);
                let cost = config.replace_cost;
                let level = if efficiency(patients, cost) > config.efficiency_threshold {
                    RoiLevel::Excellent
                } else {
                    RoiLevel::Good
                };
                (cost, patients, level)
            }
            InterventionType::ExtendDuration => {
                Self::ensure_positive_amount(request.amount, "延长周数")?;
                let patients = request.amount * config.extend_patients_per_week;
                let cost = request.amount * config.extend_cost_per_week;
                (cost, patients, RoiLevel::Good)
            }
        };

        let patients_per_dollar = round6(efficiency(additional_patients, cost));

        info!(
            site_id = %request.site_id,
            intervention = %request.intervention_type,
            cost,
            additional_patients,
            assessment = %assessment,
            "干预ROI评估完成"
        );

        Ok(InterventionEstimate {
            site_id: request.site_id.clone(),
            intervention_type: request.intervention_type,
            estimated_cost: cost,
            additional_patients,
            patients_per_dollar,
            roi_assessment: assessment,
            recommendation: format!(
                "预计该干预可额外入组约{}名受试者, 成本约${}",
                additional_patients, cost
            ),
        })
    }

    /// 数量正数检查 (成本与效率计算的分母来源)
    fn ensure_positive_amount(amount: i64, field: &str) -> EngineResult<()> {
        if amount <= 0 {
            return Err(EngineError::InvalidParameter {
                field: field.to_string(),
                message: format!("必须为正数, 实际为{amount}"),
            });
        }
        Ok(())
    }
}

/// 单位美元入组效率
fn efficiency(patients: i64, cost: i64) -> f64 {
    patients as f64 / cost as f64
}

/// 保留6位小数
fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RoiEstimator {
    fn default() -> Self {
        Self::new()
    }
}
