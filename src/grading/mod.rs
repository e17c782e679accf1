//! 评分核心
//!
//! 三层结构，自底向上：
//! - `evaluator`: 单次评估单元，一次执行调用 + 一次评估调用，无内部重试
//! - `engine`: 提交评分器，串行跑 N 轮评估并聚合（首轮失败即中止）
//! - `orchestrator`: 批量编排器，推进提交状态机并隔离单条失败
//!
//! 失败按 `OracleError -> EvaluationError -> GradingError` 逐层包装，
//! 以显式 Result 早返回传播，最终在编排器的提交边界转化为落库状态。

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod orchestrator;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{AggregateResult, DEFAULT_RUN_COUNT, SubmissionGrader};
pub use error::{EvaluationError, GradingError};
pub use evaluator::{PromptEvaluator, RunEvaluation};
pub use orchestrator::BatchOrchestrator;
