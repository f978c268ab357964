// ==========================================
// 临床试验DSS - 干预评估对象
// ==========================================
// 职责: 定义干预请求与成本收益评估结果
// ==========================================

use crate::domain::types::{InterventionType, RoiLevel};
use serde::{Deserialize, Serialize};

// ==========================================
// InterventionRequest - 干预请求
// ==========================================
/// 干预评估请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionRequest {
    /// 目标中心
    pub site_id: String,
    pub intervention_type: InterventionType,
    /// 类型相关数量: 预算(美元)或延长周数
    pub amount: i64,
}

// ==========================================
// InterventionEstimate - 评估结果
// ==========================================
/// 干预成本收益评估结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterventionEstimate {
    pub site_id: String,
    pub intervention_type: InterventionType,
    /// 估算成本 (美元)
    pub estimated_cost: i64,
    /// 估算额外入组人数
    pub additional_patients: i64,
    /// 单位美元入组效率 (保留6位小数)
    pub patients_per_dollar: f64,
    pub roi_assessment: RoiLevel,
    /// 一句话建议 (确定性模板拼装)
    pub recommendation: String,
}
