//! 评分核心测试辅助：脚本化的假模型客户端

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::oracle::{Oracle, OracleError, OracleRequest};

/// 按预置脚本依次应答的假 Oracle，同时记录收到的请求
pub struct ScriptedOracle {
    responses: Mutex<VecDeque<Result<String, OracleError>>>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    pub fn new(responses: Vec<Result<String, OracleError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 目前已收到的请求快照
    pub fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 构造 run_count 轮全部成功的脚本（执行输出 + 指定分数的判定）
    pub fn with_run_scores(scores: &[f64]) -> Self {
        let mut responses = Vec::new();
        for (i, score) in scores.iter().enumerate() {
            responses.push(Ok(format!("execution output {}", i + 1)));
            responses.push(Ok(format!(
                r#"{{"score": {score}, "feedback": "run {} feedback", "strengths": "s", "improvements": "i"}}"#,
                i + 1
            )));
        }
        Self::new(responses)
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedOracle ran out of scripted responses")
    }
}
