//! 评分核心错误类型
//!
//! Display 输出始终是最底层的原因字符串：编排器把它拼入
//! `"Grading failed: <cause>"` 诊断写回提交记录，轮次等上下文走日志。

use crate::oracle::OracleError;

/// 单次评估失败，携带底层模型调用失败原因
#[derive(Debug)]
pub struct EvaluationError {
    cause: OracleError,
}

impl EvaluationError {
    pub fn new(cause: OracleError) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &OracleError {
        &self.cause
    }
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

/// 整次评分中止：某一轮评估失败，已收集的轮次全部丢弃
#[derive(Debug)]
pub struct GradingError {
    failed_run: usize,
    cause: EvaluationError,
}

impl GradingError {
    pub fn new(failed_run: usize, cause: EvaluationError) -> Self {
        Self { failed_run, cause }
    }

    /// 失败发生在第几轮（1 起始）
    pub fn failed_run(&self) -> usize {
        self.failed_run
    }

    pub fn cause(&self) -> &EvaluationError {
        &self.cause
    }
}

impl std::fmt::Display for GradingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl std::error::Error for GradingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_root_cause() {
        let err = GradingError::new(
            2,
            EvaluationError::new(OracleError::new("rate limit exceeded")),
        );
        assert_eq!(err.to_string(), "rate limit exceeded");
        assert_eq!(err.failed_run(), 2);
        assert_eq!(format!("Grading failed: {err}"), "Grading failed: rate limit exceeded");
    }

    #[test]
    fn test_source_chain() {
        use std::error::Error;

        let err = GradingError::new(
            1,
            EvaluationError::new(OracleError::new("connection refused")),
        );
        let eval = err.source().expect("GradingError has a source");
        assert!(eval.source().is_some());
    }
}
