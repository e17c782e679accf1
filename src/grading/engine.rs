//! 提交评分器
//!
//! 对一份提交串行执行 N 轮评估并聚合。串行而非并发：一次只有一个模型调用
//! 在途，外部配额压力可控，失败也能明确归因到具体轮次。
//!
//! 失败策略为 fail-fast：任何一轮失败立即中止整次评分并丢弃已收集的轮次。
//! 少于配置轮数的部分平均会低估估计噪声，宁可整体失败交给外部重新入队。

use tracing::debug;

use super::error::GradingError;
use super::evaluator::PromptEvaluator;

/// 默认评估轮数
pub const DEFAULT_RUN_COUNT: usize = 3;

/// 一次评分的聚合结果，由编排器写回提交记录
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    /// 平均分，保留两位小数
    pub average_score: f64,
    /// 按轮次顺序的逐轮得分，用于审计
    pub detailed_scores: Vec<f64>,
    /// 组合反馈：平均分 + 逐轮得分列表 + 首轮反馈
    pub feedback: String,
}

pub struct SubmissionGrader {
    evaluator: PromptEvaluator,
    run_count: usize,
}

impl SubmissionGrader {
    pub fn new(evaluator: PromptEvaluator, run_count: usize) -> Self {
        Self {
            evaluator,
            run_count: run_count.max(1),
        }
    }

    /// 评分一份提交
    ///
    /// 恰好执行 run_count 轮评估；任意一轮失败即返回该轮的失败原因。
    pub async fn grade(
        &self,
        task_prompt: &str,
        submitted_text: &str,
    ) -> Result<AggregateResult, GradingError> {
        let mut scores: Vec<f64> = Vec::with_capacity(self.run_count);
        let mut first_feedback: Option<String> = None;

        for run in 1..=self.run_count {
            debug!("Evaluation run {}/{}", run, self.run_count);

            let evaluation = self
                .evaluator
                .evaluate(task_prompt, submitted_text)
                .await
                .map_err(|cause| GradingError::new(run, cause))?;

            debug!("Run {} score: {}", run, evaluation.score);

            if first_feedback.is_none() {
                first_feedback = Some(evaluation.feedback);
            }
            scores.push(evaluation.score);
        }

        let average_score = round2(scores.iter().sum::<f64>() / scores.len() as f64);
        let feedback =
            compose_feedback(average_score, &scores, &first_feedback.unwrap_or_default());

        Ok(AggregateResult {
            average_score,
            detailed_scores: scores,
            feedback,
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 组合反馈文本
///
/// 仅保留首轮反馈作为代表，避免反馈随轮数无界增长；
/// 逐轮得分列在头部，被丢弃的轮次仍然可见。
fn compose_feedback(average_score: f64, scores: &[f64], first_feedback: &str) -> String {
    let per_run = scores
        .iter()
        .map(|s| format!("{s:.2}점"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "평균 점수: {average_score:.2}점\n\n각 실행별 점수: {per_run}\n\n종합 피드백:\n{first_feedback}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::evaluator::PromptEvaluator;
    use crate::grading::testing::ScriptedOracle;
    use crate::oracle::OracleError;
    use std::sync::Arc;

    fn grader_with(oracle: Arc<ScriptedOracle>, run_count: usize) -> SubmissionGrader {
        SubmissionGrader::new(PromptEvaluator::new(oracle, 0.7, 0.3), run_count)
    }

    #[tokio::test]
    async fn test_grade_averages_three_runs() {
        let oracle = Arc::new(ScriptedOracle::with_run_scores(&[80.0, 85.0, 75.0]));
        let grader = grader_with(oracle.clone(), 3);

        let result = grader
            .grade("Summarize this text in one sentence", "Summarize: {text}")
            .await
            .unwrap();

        assert_eq!(result.average_score, 80.0);
        assert_eq!(result.detailed_scores, vec![80.0, 85.0, 75.0]);
        assert!(result.feedback.starts_with("평균 점수: 80.00점"));
        assert!(result.feedback.contains("80.00점, 85.00점, 75.00점"));
        // 代表反馈取自首轮
        assert!(result.feedback.contains("run 1 feedback"));
        assert!(!result.feedback.contains("run 2 feedback"));

        // 每轮两次模型调用
        assert_eq!(oracle.requests().len(), 6);
    }

    #[tokio::test]
    async fn test_grade_rounds_to_two_decimals() {
        let oracle = Arc::new(ScriptedOracle::with_run_scores(&[80.0, 81.0, 81.0]));
        let grader = grader_with(oracle, 3);

        let result = grader.grade("task", "text").await.unwrap();

        // (80 + 81 + 81) / 3 = 80.666...
        assert_eq!(result.average_score, 80.67);
        assert!(result.feedback.starts_with("평균 점수: 80.67점"));
    }

    #[tokio::test]
    async fn test_grade_fail_fast_discards_partial_runs() {
        // 第 1 轮成功，第 2 轮执行调用失败
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("output 1".to_string()),
            Ok(r#"{"score": 90, "feedback": "good"}"#.to_string()),
            Err(OracleError::new("rate limit exceeded")),
        ]));
        let grader = grader_with(oracle.clone(), 3);

        let err = grader.grade("task", "text").await.unwrap_err();

        assert_eq!(err.failed_run(), 2);
        assert_eq!(err.to_string(), "rate limit exceeded");
        // 失败后立即中止，第 3 轮从未发起
        assert_eq!(oracle.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_grade_single_run() {
        let oracle = Arc::new(ScriptedOracle::with_run_scores(&[77.0]));
        let grader = grader_with(oracle, 1);

        let result = grader.grade("task", "text").await.unwrap();

        assert_eq!(result.average_score, 77.0);
        assert_eq!(result.detailed_scores, vec![77.0]);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(80.0 + 2.0 / 3.0), 80.67);
        assert_eq!(round2(79.996), 80.0);
        assert_eq!(round2(80.0), 80.0);
    }
}
