// ==========================================
// 临床试验DSS - 蒙特卡洛入组预测引擎
// ==========================================
// 职责: 各中心随机入组率模型 → 试验级终态分布投影
// 输入: EnrollmentSnapshot + 预测参数 + 注入的随机源
// 输出: ForecastResult (P10/P50/P90 + 目标达成概率)
// 红线: 随机源由调用方注入,同种子必须完全可复现
// 红线: 分位统计量向下取整 (保守口径)
// ==========================================

use crate::config::ForecastConfig;
use crate::domain::enrollment::EnrollmentSnapshot;
use crate::domain::forecast::ForecastResult;
use crate::engine::error::{EngineError, EngineResult};
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use tracing::info;

// ==========================================
// MonteCarloForecaster - 入组预测引擎
// ==========================================
pub struct MonteCarloForecaster {
    // 无状态引擎,不需要注入依赖
}

impl MonteCarloForecaster {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 运行蒙特卡洛入组预测
    ///
    /// # 模型
    /// - 各中心历史周入组率 = total_enrolled / weeks_active (weeks_active=0 的中心剔除)
    /// - 每次模拟: 逐剩余周、逐中心,先对入组率叠加零均值高斯扰动并
    ///   截断到非负 max(0, rate + N(0, sigma)),再按该扰动率抽取泊松入组数,
    ///   中心、周两级求和得到该次模拟的增量入组
    /// - N 次模拟的终态分布给出 P10/P50/P90 (线性插值分位) 与目标达成概率
    ///
    /// # 参数
    /// - `snapshot`: 入组快照 (当前累计与各中心历史)
    /// - `config`: 预测参数 (剩余周数/目标/模拟次数/扰动标准差)
    /// - `rng`: 随机源; 种子固定时输出完全可复现
    ///
    /// # 错误
    /// - `InvalidParameter`: 模拟次数为0或扰动标准差非法
    /// - `InsufficientData`: 无任何中心具有正的 weeks_active
    pub fn forecast<R: Rng + ?Sized>(
        &self,
        snapshot: &EnrollmentSnapshot,
        config: &ForecastConfig,
        rng: &mut R,
    ) -> EngineResult<ForecastResult> {
        // === 步骤 1: 参数检查 ===
        if config.n_simulations == 0 {
            return Err(EngineError::InvalidParameter {
                field: "n_simulations".to_string(),
                message: "模拟次数必须 >= 1".to_string(),
            });
        }

        // === 步骤 2: 派生各中心历史周入组率 ===
        let site_rates: Vec<f64> = snapshot
            .summaries
            .iter()
            .filter(|s| s.weeks_active >= 1)
            .map(|s| f64::from(s.total_enrolled) / f64::from(s.weeks_active))
            .collect();

        if site_rates.is_empty() {
            return Err(EngineError::InsufficientData(
                "无中心具有正的活跃周数,无法派生入组率".to_string(),
            ));
        }

        let current_total = snapshot.total_enrolled();
        let weeks_elapsed = snapshot.latest_week;

        // === 步骤 3: 零时域退化预测 ===
        if config.weeks_remaining == 0 {
            let probability = if current_total >= config.target_enrollment {
                1.0
            } else {
                0.0
            };
            return Ok(ForecastResult {
                current_enrolled: current_total,
                weeks_elapsed,
                weeks_remaining: 0,
                p10_final: u64::from(current_total),
                p50_final: u64::from(current_total),
                p90_final: u64::from(current_total),
                probability_meeting_target: probability,
                target_enrollment: config.target_enrollment,
                n_simulations: config.n_simulations,
            });
        }

        let noise = Normal::new(0.0, config.rate_noise_sigma).map_err(|e| {
            EngineError::InvalidParameter {
                field: "rate_noise_sigma".to_string(),
                message: e.to_string(),
            }
        })?;

        // === 步骤 4: 模拟循环 (逐次独立,种子固定即可复现) ===
        let mut simulated_totals = Vec::with_capacity(config.n_simulations as usize);
        for _ in 0..config.n_simulations {
            let mut cumulative = 0.0f64;
            for _week in 0..config.weeks_remaining {
                for &avg_rate in &site_rates {
                    let perturbed = (avg_rate + noise.sample(rng)).max(0.0);
                    // 泊松分布要求 lambda > 0,截断到0的周视为无入组
                    if perturbed > 0.0 {
                        let poisson = Poisson::new(perturbed).map_err(|e| {
                            EngineError::InvalidParameter {
                                field: "poisson_lambda".to_string(),
                                message: e.to_string(),
                            }
                        })?;
                        let draw: f64 = poisson.sample(rng);
                        cumulative += draw;
                    }
                }
            }
            simulated_totals.push(cumulative);
        }

        // === 步骤 5: 终态分布统计 ===
        simulated_totals.sort_by(f64::total_cmp);
        let current = f64::from(current_total);
        let p10_final = (current + percentile(&simulated_totals, 10.0)).floor() as u64;
        let p50_final = (current + percentile(&simulated_totals, 50.0)).floor() as u64;
        let p90_final = (current + percentile(&simulated_totals, 90.0)).floor() as u64;

        let target = f64::from(config.target_enrollment);
        let hits = simulated_totals
            .iter()
            .filter(|&&incremental| current + incremental >= target)
            .count();
        let probability =
            round3(hits as f64 / f64::from(config.n_simulations));

        info!(
            current = current_total,
            p10 = p10_final,
            p50 = p50_final,
            p90 = p90_final,
            probability,
            "蒙特卡洛预测完成"
        );

        Ok(ForecastResult {
            current_enrolled: current_total,
            weeks_elapsed,
            weeks_remaining: config.weeks_remaining,
            p10_final,
            p50_final,
            p90_final,
            probability_meeting_target: probability,
            target_enrollment: config.target_enrollment,
            n_simulations: config.n_simulations,
        })
    }
}

// ==========================================
// 统计辅助函数
// ==========================================

/// 线性插值分位数 (标准口径: rank = p/100 * (n-1))
///
/// # 前置条件
/// `sorted` 非空且已升序排序
fn percentile(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// 保留3位小数
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for MonteCarloForecaster {
    fn default() -> Self {
        Self::new()
    }
}
