// ==========================================
// 临床试验DSS - 中心主数据实体
// ==========================================
// 职责: 定义中心遴选阶段的三张输入表实体
// 红线: 输入实体只读,装载后不可变更
// ==========================================

use crate::domain::types::SiteType;
use serde::{Deserialize, Serialize};

// ==========================================
// Site - 中心描述信息
// ==========================================
/// 中心主数据(sites_and_investigators 表)
///
/// 每个中心装载一次,后续所有计算仅做只读关联
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    /// 中心唯一标识 (如 "Site-047")
    pub site_id: String,
    /// 中心名称
    pub site_name: String,
    /// 所在城市
    pub city: String,
    /// 所在州
    pub state: String,
    /// 中心类型 (academic / community)
    pub site_type: SiteType,
    /// 治疗领域标签
    pub therapeutic_areas: Vec<String>,
    /// 主要研究者姓名
    pub pi_name: String,
    /// 主要研究者经验年限
    pub pi_experience_years: i32,
    /// 床位数
    pub beds: i32,
}

// ==========================================
// PerformanceRecord - 历史绩效
// ==========================================
/// 历史绩效记录(historical_performance 表,与中心一对一)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub site_id: String,
    /// 已完成试验数
    pub trials_completed: i32,
    /// 历史平均入组率 (0~1)
    pub avg_enrollment_rate: f64,
    /// 筛选失败率 (0~1)
    pub avg_screen_fail_rate: f64,
    /// 脱落率 (0~1)
    pub avg_dropout_rate: f64,
    /// 数据质量评分 (0~1)
    pub data_quality_score: f64,
    /// 首例患者入组耗时(天)
    pub avg_days_to_first_patient: i32,
    /// 平均单试验方案偏离次数
    pub protocol_deviations_per_trial: f64,
}

// ==========================================
// AccessRecord - 患者可及性
// ==========================================
/// 患者可及性记录(patient_density 表,与中心一对一)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRecord {
    pub site_id: String,
    /// 30英里半径内合格患者数
    pub eligible_patients_30mi: i32,
    /// 同适应症竞争试验数
    pub competing_trials_same_indication: i32,
    /// 家庭收入中位数
    pub median_household_income: i32,
    /// 出行便利度 (0~1, 越高越易达)
    pub travel_burden_score: f64,
}
