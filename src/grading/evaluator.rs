//! 单次评估单元
//!
//! 一次 evaluate 对应两次模型调用：先以赛题任务描述为控制指令执行参赛者的
//! 提示词（较高采样温度，轮次间的输出差异正是多轮平均要消化的对象），再以
//! 评估者角色按五项评分标准产出结构化判定（较低温度，JSON 约束）。
//! 本层无重试：瞬时失败必须原样上浮到批次诊断，不允许悄悄消失。

use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use super::error::EvaluationError;
use crate::oracle::{Oracle, OracleError, OracleRequest};

/// 评估者角色的控制指令
const EVALUATOR_SYSTEM_PROMPT: &str =
    "You are a prompt evaluation expert. Always respond in valid JSON format.";

/// 一轮评估的结果
///
/// 仅在一次评分调用内存活；聚合后只有分数与首轮反馈被折叠进提交记录。
#[derive(Debug, Clone)]
pub struct RunEvaluation {
    pub output: String,
    pub score: f64,
    pub feedback: String,
}

/// 模型返回的结构化判定
#[derive(Debug, Deserialize)]
struct EvaluationVerdict {
    score: f64,
    #[serde(default)]
    feedback: String,
    #[serde(default)]
    strengths: String,
    #[serde(default)]
    improvements: String,
}

pub struct PromptEvaluator {
    oracle: Arc<dyn Oracle>,
    execution_temperature: f64,
    evaluation_temperature: f64,
}

impl PromptEvaluator {
    pub fn new(oracle: Arc<dyn Oracle>, execution_temperature: f64, evaluation_temperature: f64) -> Self {
        Self {
            oracle,
            execution_temperature,
            evaluation_temperature,
        }
    }

    /// 执行并评估一次提交的提示词
    pub async fn evaluate(
        &self,
        task_prompt: &str,
        submitted_text: &str,
    ) -> Result<RunEvaluation, EvaluationError> {
        // 第一次调用：执行参赛者的提示词
        let output = self
            .oracle
            .complete(OracleRequest {
                system: task_prompt.to_string(),
                user: submitted_text.to_string(),
                temperature: self.execution_temperature,
                json_response: false,
            })
            .await
            .map_err(EvaluationError::new)?;

        debug!("Execution output length: {} chars", output.len());

        // 第二次调用：评估执行结果
        let verdict_text = self
            .oracle
            .complete(OracleRequest {
                system: EVALUATOR_SYSTEM_PROMPT.to_string(),
                user: build_evaluation_prompt(task_prompt, submitted_text, &output),
                temperature: self.evaluation_temperature,
                json_response: true,
            })
            .await
            .map_err(EvaluationError::new)?;

        let verdict: EvaluationVerdict = serde_json::from_str(&verdict_text).map_err(|e| {
            EvaluationError::new(OracleError::new(format!(
                "Failed to parse evaluation verdict JSON: {e}"
            )))
        })?;

        debug!(
            score = verdict.score,
            strengths = %verdict.strengths,
            improvements = %verdict.improvements,
            "Run evaluated"
        );

        Ok(RunEvaluation {
            output,
            // 结构合法但越界的分数收敛到 0-100，不另立失败类型
            score: verdict.score.clamp(0.0, 100.0),
            feedback: verdict.feedback,
        })
    }
}

/// 构造评估提示词（五项标准，各 20 分，合计 0-100）
fn build_evaluation_prompt(task_prompt: &str, submitted_text: &str, output: &str) -> String {
    format!(
        r#"당신은 프롬프트 평가 전문가입니다.

**과제 설명:**
{task_prompt}

**제출된 프롬프트:**
{submitted_text}

**프롬프트 실행 결과:**
{output}

다음 기준으로 제출된 프롬프트를 평가해주세요:

1. **과제 이해도 (20점)**: 프롬프트가 과제 요구사항을 정확히 이해했는가?
2. **명확성 (20점)**: 프롬프트가 명확하고 구체적인가?
3. **창의성 (20점)**: 독창적이고 효과적인 접근 방식인가?
4. **실행 결과 품질 (20점)**: 실제 출력물이 과제 목표를 달성했는가?
5. **완성도 (20점)**: 전체적으로 완성도가 높은가?

**응답 형식 (JSON):**
{{
    "score": <0-100 사이의 점수>,
    "feedback": "<구체적인 피드백 (200자 이내)>",
    "strengths": "<강점>",
    "improvements": "<개선점>"
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::testing::ScriptedOracle;

    #[test]
    fn test_build_evaluation_prompt_contains_inputs() {
        let prompt = build_evaluation_prompt("task description", "submitted prompt", "model output");

        assert!(prompt.contains("task description"));
        assert!(prompt.contains("submitted prompt"));
        assert!(prompt.contains("model output"));
        assert!(prompt.contains("과제 이해도"));
    }

    #[tokio::test]
    async fn test_evaluate_success() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("generated output".to_string()),
            Ok(r#"{"score": 85, "feedback": "좋은 프롬프트입니다", "strengths": "명확함", "improvements": "예시 보강"}"#.to_string()),
        ]));

        let evaluator = PromptEvaluator::new(oracle.clone(), 0.7, 0.3);
        let result = evaluator.evaluate("task", "submission").await.unwrap();

        assert_eq!(result.output, "generated output");
        assert_eq!(result.score, 85.0);
        assert_eq!(result.feedback, "좋은 프롬프트입니다");

        // 两次调用：先执行后评估，评估调用要求 JSON 输出
        let requests = oracle.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].system, "task");
        assert_eq!(requests[0].user, "submission");
        assert!(!requests[0].json_response);
        assert!(requests[1].json_response);
        assert!(requests[1].user.contains("generated output"));
        assert!(requests[1].temperature < requests[0].temperature);
    }

    #[tokio::test]
    async fn test_evaluate_execution_failure() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Err(OracleError::new(
            "rate limit exceeded",
        ))]));

        let evaluator = PromptEvaluator::new(oracle, 0.7, 0.3);
        let err = evaluator.evaluate("task", "submission").await.unwrap_err();

        assert_eq!(err.to_string(), "rate limit exceeded");
    }

    #[tokio::test]
    async fn test_evaluate_malformed_verdict() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("generated output".to_string()),
            Ok("not valid json".to_string()),
        ]));

        let evaluator = PromptEvaluator::new(oracle, 0.7, 0.3);
        let err = evaluator.evaluate("task", "submission").await.unwrap_err();

        assert!(
            err.to_string()
                .contains("Failed to parse evaluation verdict JSON")
        );
    }

    #[tokio::test]
    async fn test_evaluate_clamps_out_of_range_score() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok("output".to_string()),
            Ok(r#"{"score": 120, "feedback": "over"}"#.to_string()),
        ]));

        let evaluator = PromptEvaluator::new(oracle, 0.7, 0.3);
        let result = evaluator.evaluate("task", "submission").await.unwrap();

        assert_eq!(result.score, 100.0);
    }
}
