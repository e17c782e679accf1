use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    competitions::{entities::Competition, requests::CreateCompetitionRequest},
    grading::responses::GradingStatusResponse,
    participants::entities::{NewParticipant, Participant},
    submissions::{
        entities::{PendingSubmission, Submission, SubmissionStatus},
        requests::SubmissionListQuery,
        responses::SubmissionListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 竞赛管理方法
    // 创建竞赛
    async fn create_competition(&self, competition: CreateCompetitionRequest)
    -> Result<Competition>;
    // 通过ID获取竞赛信息
    async fn get_competition_by_id(&self, id: i64) -> Result<Option<Competition>>;
    // 列出竞赛（按创建时间倒序）
    async fn list_competitions(&self) -> Result<Vec<Competition>>;

    /// 赛题管理方法
    // 创建赛题
    async fn create_assignment(
        &self,
        competition_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 列出竞赛下的全部赛题
    async fn list_assignments(&self, competition_id: i64) -> Result<Vec<Assignment>>;

    /// 参赛者管理方法
    // 批量创建参赛者（导入）
    async fn create_participants(
        &self,
        competition_id: i64,
        participants: Vec<NewParticipant>,
    ) -> Result<usize>;
    // 列出竞赛下的全部参赛者
    async fn list_participants(&self, competition_id: i64) -> Result<Vec<Participant>>;

    /// 提交管理方法
    // 创建提交（初始状态 pending）
    async fn create_submission(
        &self,
        competition_id: i64,
        participant_id: i64,
        assignment_id: i64,
        prompt_text: String,
    ) -> Result<Submission>;
    // 列出提交（分页，附带参赛者与赛题名称）
    async fn list_submissions_with_pagination(
        &self,
        competition_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;

    /// 评分流水线方法
    // 批次快照：取出竞赛下全部 pending 提交，附带赛题任务描述
    async fn list_pending_submissions(&self, competition_id: i64)
    -> Result<Vec<PendingSubmission>>;
    // 更新提交状态
    async fn update_submission_status(&self, id: i64, status: SubmissionStatus) -> Result<bool>;
    // 写入评分成功的终态（status=completed，分数、反馈与逐轮明细一次性落库）
    async fn complete_submission(
        &self,
        id: i64,
        score: f64,
        feedback: &str,
        grading_details: &str,
    ) -> Result<bool>;
    // 写入评分失败的终态（status=error，反馈为诊断串，分数保持为空）
    async fn fail_submission(&self, id: i64, feedback: &str) -> Result<bool>;
    // 按状态统计竞赛下的提交数量
    async fn count_submissions_by_status(&self, competition_id: i64)
    -> Result<GradingStatusResponse>;
    // 列出已完成评分的提交（排行榜/报告聚合用）
    async fn list_completed_submissions(&self, competition_id: i64) -> Result<Vec<Submission>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
