// ==========================================
// 临床试验DSS - 导入层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 文件缺失/列缺失一律报错,不以默认值静默兜底
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 导入层错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("读取数据文件失败: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("解析CSV失败 (缺列/类型不匹配): {path} 第{row}条记录")]
    Parse {
        path: PathBuf,
        /// 记录序号 (1起,不含表头)
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("CSV表结构非法: {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
