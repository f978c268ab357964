// ==========================================
// 临床试验DSS - 预测结果对象
// ==========================================
// 职责: 定义蒙特卡洛终态分布预测结果
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ForecastResult - 入组预测结果
// ==========================================
/// 蒙特卡洛入组预测结果
///
/// 三个分位数为试验结束时累计入组的终态分布投影,
/// 按保守口径对分位统计量向下取整
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResult {
    /// 当前累计入组
    pub current_enrolled: u32,
    /// 已进行周数
    pub weeks_elapsed: u32,
    /// 剩余周数
    pub weeks_remaining: u32,

    /// P10 悲观投影 (最终累计入组)
    pub p10_final: u64,
    /// P50 中位投影
    pub p50_final: u64,
    /// P90 乐观投影
    pub p90_final: u64,

    /// 达成入组目标的概率 (0~1, 保留3位小数)
    pub probability_meeting_target: f64,
    /// 入组目标
    pub target_enrollment: u32,
    /// 模拟次数
    pub n_simulations: u32,
}
