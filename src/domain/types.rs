// ==========================================
// 临床试验DSS - 领域类型定义
// ==========================================
// 职责: 定义枚举类型与序列化口径
// 序列化格式: snake_case (与CSV输入/JSON输出一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 中心类型 (Site Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Academic,  // 学术型中心
    Community, // 社区型中心
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Academic => write!(f, "academic"),
            SiteType::Community => write!(f, "community"),
        }
    }
}

// ==========================================
// 异常类型 (Anomaly Type)
// ==========================================
// 优先级: Flatlined > Underperforming (单中心仅报一种)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    Flatlined,       // 入组停滞
    Underperforming, // 入组不达标
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyType::Flatlined => write!(f, "flatlined"),
            AnomalyType::Underperforming => write!(f, "underperforming"),
        }
    }
}

// ==========================================
// 告警级别 (Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,  // 警告
    Critical, // 严重
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

// ==========================================
// 干预类型 (Intervention Type)
// ==========================================
// 由调用方以字符串给出,解析失败返回结构化错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterventionType {
    AddBudget,      // 追加招募预算
    ReplaceSite,    // 更换中心
    ExtendDuration, // 延长试验周期
}

impl InterventionType {
    /// 解析干预类型字符串
    ///
    /// # 返回
    /// 未识别的类型返回 None,由调用方转为结构化错误
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "add_budget" => Some(InterventionType::AddBudget),
            "replace_site" => Some(InterventionType::ReplaceSite),
            "extend_duration" => Some(InterventionType::ExtendDuration),
            _ => None,
        }
    }
}

impl fmt::Display for InterventionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterventionType::AddBudget => write!(f, "add_budget"),
            InterventionType::ReplaceSite => write!(f, "replace_site"),
            InterventionType::ExtendDuration => write!(f, "extend_duration"),
        }
    }
}

// ==========================================
// ROI 评级 (ROI Level)
// ==========================================
// 等级制,不是评分制: 仅与固定阈值比较后定级
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiLevel {
    Poor,      // 低回报
    Good,      // 良好
    Excellent, // 优秀
}

impl fmt::Display for RoiLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiLevel::Poor => write!(f, "poor"),
            RoiLevel::Good => write!(f, "good"),
            RoiLevel::Excellent => write!(f, "excellent"),
        }
    }
}
