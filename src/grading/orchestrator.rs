//! 批量评分编排器
//!
//! 对一场竞赛执行一轮批次：批次开始时一次性快照全部 pending 提交，逐条
//! 推进 pending -> grading -> completed | error 状态机。状态转移先落库再
//! 干活，并发的状态轮询随时能看到进度。单条提交的失败被完全隔离，绝不
//! 中断批次；失败在提交边界转化为落库的诊断串，不再向上传播。
//!
//! 提交间与轮次间均为串行。快照之后入库的提交不属于本轮批次。

use std::sync::Arc;
use tracing::{error, info, warn};

use super::engine::SubmissionGrader;
use crate::cache::{ObjectCache, leaderboard_cache_key, report_cache_key};
use crate::models::submissions::entities::SubmissionStatus;
use crate::storage::Storage;

pub struct BatchOrchestrator {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    grader: SubmissionGrader,
}

impl BatchOrchestrator {
    pub fn new(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn ObjectCache>,
        grader: SubmissionGrader,
    ) -> Self {
        Self {
            storage,
            cache,
            grader,
        }
    }

    /// 执行一轮批次评分
    ///
    /// 作为后台任务运行，调用方在批次启动前就已收到确认响应；
    /// 本方法不返回错误，一切异常都已折叠进日志与提交状态。
    pub async fn run_batch(&self, competition_id: i64) {
        let batch_id = uuid::Uuid::new_v4();
        info!(%batch_id, competition_id, "Grading batch started");

        let pending = match self.storage.list_pending_submissions(competition_id).await {
            Ok(submissions) => submissions,
            Err(e) => {
                error!(%batch_id, "Failed to snapshot pending submissions: {}", e);
                return;
            }
        };

        let total = pending.len();
        info!(%batch_id, "Found {} pending submissions", total);

        for (idx, submission) in pending.iter().enumerate() {
            let progress = format!("{}/{}", idx + 1, total);
            info!(%batch_id, submission_id = submission.id, "Processing {}", progress);

            // 先落库 grading 状态，轮询方立即可见
            if let Err(e) = self
                .storage
                .update_submission_status(submission.id, SubmissionStatus::Grading)
                .await
            {
                error!(
                    %batch_id,
                    submission_id = submission.id,
                    "Failed to mark submission as grading: {}", e
                );
                continue;
            }

            match self
                .grader
                .grade(&submission.assignment_prompt, &submission.prompt_text)
                .await
            {
                Ok(result) => {
                    let details =
                        serde_json::to_string(&result.detailed_scores).unwrap_or_default();

                    if let Err(e) = self
                        .storage
                        .complete_submission(
                            submission.id,
                            result.average_score,
                            &result.feedback,
                            &details,
                        )
                        .await
                    {
                        error!(
                            %batch_id,
                            submission_id = submission.id,
                            "Failed to persist grading result: {}", e
                        );
                        continue;
                    }

                    info!(
                        %batch_id,
                        submission_id = submission.id,
                        "Completed {}: score={}", progress, result.average_score
                    );
                }
                Err(e) => {
                    warn!(
                        %batch_id,
                        submission_id = submission.id,
                        failed_run = e.failed_run(),
                        "Grading failed for {}: {}", progress, e
                    );

                    let diagnostic = format!("Grading failed: {e}");
                    if let Err(persist_err) = self
                        .storage
                        .fail_submission(submission.id, &diagnostic)
                        .await
                    {
                        error!(
                            %batch_id,
                            submission_id = submission.id,
                            "Failed to persist grading failure: {}", persist_err
                        );
                    }
                }
            }
        }

        // 批次结束后失效聚合缓存，排行榜与报告下次查询重算
        self.cache.remove(&leaderboard_cache_key(competition_id)).await;
        self.cache.remove(&report_cache_key(competition_id)).await;

        info!(%batch_id, competition_id, "Grading batch completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;
    use crate::errors::{PromptArenaError, Result};
    use crate::grading::evaluator::PromptEvaluator;
    use crate::grading::testing::ScriptedOracle;
    use crate::models::{
        assignments::{entities::Assignment, requests::CreateAssignmentRequest},
        competitions::{entities::Competition, requests::CreateCompetitionRequest},
        grading::responses::GradingStatusResponse,
        participants::entities::{NewParticipant, Participant},
        submissions::{
            entities::{PendingSubmission, Submission},
            requests::SubmissionListQuery,
            responses::SubmissionListResponse,
        },
    };
    use crate::oracle::OracleError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// 内存存储：仅支撑评分流水线相关的方法
    #[derive(Default)]
    struct MemoryStorage {
        rows: Mutex<Vec<MemoryRow>>,
        /// (submission_id, status) 转移日志，用于断言可见性顺序
        transitions: Mutex<Vec<(i64, String)>>,
    }

    #[derive(Clone)]
    struct MemoryRow {
        id: i64,
        status: String,
        score: Option<f64>,
        feedback: Option<String>,
        grading_details: Option<String>,
        prompt_text: String,
        assignment_prompt: String,
    }

    impl MemoryStorage {
        fn with_pending(count: usize) -> Self {
            let rows = (1..=count as i64)
                .map(|id| MemoryRow {
                    id,
                    status: "pending".to_string(),
                    score: None,
                    feedback: None,
                    grading_details: None,
                    prompt_text: format!("submission {id}"),
                    assignment_prompt: "task prompt".to_string(),
                })
                .collect();
            Self {
                rows: Mutex::new(rows),
                transitions: Mutex::new(Vec::new()),
            }
        }

        fn row(&self, id: i64) -> MemoryRow {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .expect("row exists")
        }

        fn transitions_for(&self, id: i64) -> Vec<String> {
            self.transitions
                .lock()
                .unwrap()
                .iter()
                .filter(|(row_id, _)| *row_id == id)
                .map(|(_, status)| status.clone())
                .collect()
        }
    }

    fn unsupported<T>() -> Result<T> {
        Err(PromptArenaError::database_operation(
            "not supported by MemoryStorage",
        ))
    }

    #[async_trait]
    impl Storage for MemoryStorage {
        async fn create_competition(&self, _: CreateCompetitionRequest) -> Result<Competition> {
            unsupported()
        }
        async fn get_competition_by_id(&self, _: i64) -> Result<Option<Competition>> {
            unsupported()
        }
        async fn list_competitions(&self) -> Result<Vec<Competition>> {
            unsupported()
        }
        async fn create_assignment(
            &self,
            _: i64,
            _: CreateAssignmentRequest,
        ) -> Result<Assignment> {
            unsupported()
        }
        async fn list_assignments(&self, _: i64) -> Result<Vec<Assignment>> {
            unsupported()
        }
        async fn create_participants(&self, _: i64, _: Vec<NewParticipant>) -> Result<usize> {
            unsupported()
        }
        async fn list_participants(&self, _: i64) -> Result<Vec<Participant>> {
            unsupported()
        }
        async fn create_submission(&self, _: i64, _: i64, _: i64, _: String) -> Result<Submission> {
            unsupported()
        }
        async fn list_submissions_with_pagination(
            &self,
            _: i64,
            _: SubmissionListQuery,
        ) -> Result<SubmissionListResponse> {
            unsupported()
        }

        async fn list_pending_submissions(&self, _: i64) -> Result<Vec<PendingSubmission>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.status == "pending")
                .map(|r| PendingSubmission {
                    id: r.id,
                    prompt_text: r.prompt_text.clone(),
                    assignment_prompt: r.assignment_prompt.clone(),
                })
                .collect())
        }

        async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| r.id == id);
            match row {
                Some(row) => {
                    row.status = status.to_string();
                    self.transitions
                        .lock()
                        .unwrap()
                        .push((id, status.to_string()));
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn complete_submission(
            &self,
            id: i64,
            score: f64,
            feedback: &str,
            grading_details: &str,
        ) -> Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| r.id == id);
            match row {
                Some(row) => {
                    row.status = "completed".to_string();
                    row.score = Some(score);
                    row.feedback = Some(feedback.to_string());
                    row.grading_details = Some(grading_details.to_string());
                    self.transitions
                        .lock()
                        .unwrap()
                        .push((id, "completed".to_string()));
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn fail_submission(&self, id: i64, feedback: &str) -> Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows.iter_mut().find(|r| r.id == id);
            match row {
                Some(row) => {
                    row.status = "error".to_string();
                    row.feedback = Some(feedback.to_string());
                    self.transitions
                        .lock()
                        .unwrap()
                        .push((id, "error".to_string()));
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn count_submissions_by_status(&self, _: i64) -> Result<GradingStatusResponse> {
            let rows = self.rows.lock().unwrap();
            let mut counts = GradingStatusResponse::default();
            for row in rows.iter() {
                counts.total += 1;
                match row.status.as_str() {
                    "pending" => counts.pending += 1,
                    "grading" => counts.grading += 1,
                    "completed" => counts.completed += 1,
                    "error" => counts.error += 1,
                    _ => {}
                }
            }
            Ok(counts)
        }

        async fn list_completed_submissions(&self, _: i64) -> Result<Vec<Submission>> {
            unsupported()
        }
    }

    /// 不缓存任何内容的假缓存，记录被失效的键
    #[derive(Default)]
    struct NoopCache {
        removed: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ObjectCache for NoopCache {
        async fn get_raw(&self, _key: &str) -> CacheResult<String> {
            CacheResult::NotFound
        }
        async fn insert_raw(&self, _key: String, _value: String, _ttl: u64) {}
        async fn remove(&self, key: &str) {
            self.removed.lock().unwrap().push(key.to_string());
        }
        async fn invalidate_all(&self) {}
    }

    fn orchestrator_with(
        storage: Arc<MemoryStorage>,
        cache: Arc<NoopCache>,
        oracle: ScriptedOracle,
        run_count: usize,
    ) -> BatchOrchestrator {
        let grader = SubmissionGrader::new(
            PromptEvaluator::new(Arc::new(oracle), 0.7, 0.3),
            run_count,
        );
        BatchOrchestrator::new(storage, cache, grader)
    }

    #[tokio::test]
    async fn test_batch_completes_single_submission() {
        let storage = Arc::new(MemoryStorage::with_pending(1));
        let cache = Arc::new(NoopCache::default());
        let oracle = ScriptedOracle::with_run_scores(&[80.0, 85.0, 75.0]);

        orchestrator_with(storage.clone(), cache.clone(), oracle, 3)
            .run_batch(1)
            .await;

        let row = storage.row(1);
        assert_eq!(row.status, "completed");
        assert_eq!(row.score, Some(80.0));
        assert_eq!(row.grading_details.as_deref(), Some("[80.0,85.0,75.0]"));
        assert!(row.feedback.unwrap().starts_with("평균 점수: 80.00점"));

        // 状态转移严格有序：grading 先于终态落库
        assert_eq!(storage.transitions_for(1), vec!["grading", "completed"]);
    }

    #[tokio::test]
    async fn test_batch_isolates_failed_submission() {
        // 提交 1 在第 2 轮失败，提交 2 全部成功
        let storage = Arc::new(MemoryStorage::with_pending(2));
        let cache = Arc::new(NoopCache::default());
        let mut responses = vec![
            Ok("output".to_string()),
            Ok(r#"{"score": 90, "feedback": "f"}"#.to_string()),
            Err(OracleError::new("rate limit exceeded")),
        ];
        for score in [70.0, 75.0, 80.0] {
            responses.push(Ok("output".to_string()));
            responses.push(Ok(format!(r#"{{"score": {score}, "feedback": "f"}}"#)));
        }
        let oracle = ScriptedOracle::new(responses);

        orchestrator_with(storage.clone(), cache.clone(), oracle, 3)
            .run_batch(1)
            .await;

        let failed = storage.row(1);
        assert_eq!(failed.status, "error");
        assert_eq!(failed.score, None);
        assert_eq!(
            failed.feedback.as_deref(),
            Some("Grading failed: rate limit exceeded")
        );
        assert_eq!(failed.grading_details, None);

        // 后续提交不受影响
        let ok = storage.row(2);
        assert_eq!(ok.status, "completed");
        assert_eq!(ok.score, Some(75.0));

        // 批次结束后全部提交处于终态
        let counts = storage.count_submissions_by_status(1).await.unwrap();
        assert_eq!(counts.pending, 0);
        assert_eq!(counts.grading, 0);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.error, 1);
    }

    #[tokio::test]
    async fn test_batch_invalidates_aggregate_caches() {
        let storage = Arc::new(MemoryStorage::with_pending(0));
        let cache = Arc::new(NoopCache::default());
        let oracle = ScriptedOracle::new(vec![]);

        orchestrator_with(storage, cache.clone(), oracle, 3)
            .run_batch(42)
            .await;

        let removed = cache.removed.lock().unwrap().clone();
        assert!(removed.contains(&"leaderboard:42".to_string()));
        assert!(removed.contains(&"report:42".to_string()));
    }

    #[tokio::test]
    async fn test_batch_with_no_pending_submissions_changes_nothing() {
        let storage = Arc::new(MemoryStorage::with_pending(0));
        let cache = Arc::new(NoopCache::default());
        let oracle = ScriptedOracle::new(vec![]);

        orchestrator_with(storage.clone(), cache, oracle, 3)
            .run_batch(1)
            .await;

        assert!(storage.transitions.lock().unwrap().is_empty());
    }
}
