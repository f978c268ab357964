// ==========================================
// 临床试验DSS - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 输入形状错误在引擎边界整体报出,不做部分计算
// 红线: 不以默认值静默吞掉错误 (公式内的零下限截断除外)
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 输入关联错误 =====
    #[error("输入表关联失败: table={table}, {reason}")]
    DataJoin { table: String, reason: String },

    // ===== 过滤清空错误 =====
    #[error("过滤后无候选结果: 共{total}个中心, 被过滤{excluded}个 ({reason})")]
    EmptyResult {
        total: usize,
        excluded: usize,
        reason: String,
    },

    // ===== 数据不足错误 =====
    #[error("数据不足,无法预测: {0}")]
    InsufficientData(String),

    // ===== 调用方输入错误 =====
    #[error("未识别的干预类型: {given}")]
    UnrecognizedIntervention { given: String },

    #[error("参数非法 (field={field}): {message}")]
    InvalidParameter { field: String, message: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
