//! 提交存储操作
//!
//! 评分流水线的全部落库动作都在这里：批次快照、状态转移、终态写入与
//! 状态统计。终态写入是单条 UPDATE，状态、分数、反馈与明细一次性生效。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::participants::{Column as ParticipantColumn, Entity as Participants};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::errors::{PromptArenaError, Result};
use crate::models::{
    PaginationInfo,
    grading::responses::GradingStatusResponse,
    submissions::{
        entities::{PendingSubmission, Submission, SubmissionStatus},
        requests::SubmissionListQuery,
        responses::{SubmissionListItem, SubmissionListResponse},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::warn;

impl SeaOrmStorage {
    /// 创建提交（初始状态 pending）
    pub async fn create_submission_impl(
        &self,
        competition_id: i64,
        participant_id: i64,
        assignment_id: i64,
        prompt_text: String,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            competition_id: Set(competition_id),
            participant_id: Set(participant_id),
            assignment_id: Set(assignment_id),
            prompt_text: Set(prompt_text),
            status: Set(SubmissionStatus::Pending.to_string()),
            submitted_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("创建提交失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 列出提交（分页，附带参赛者与赛题名称）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        competition_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 10000) as u64;

        let mut select = Submissions::find().filter(Column::CompetitionId.eq(competition_id));

        // 赛题筛选
        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        // 参赛者筛选
        if let Some(participant_id) = query.participant_id {
            select = select.filter(Column::ParticipantId.eq(participant_id));
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status));
        }

        // 排序
        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量查询参赛者与赛题名称
        let participant_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.participant_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();
        let assignment_ids: Vec<i64> = submissions
            .iter()
            .map(|s| s.assignment_id)
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        let participants = Participants::find()
            .filter(ParticipantColumn::Id.is_in(participant_ids))
            .all(&self.db)
            .await
            .map_err(|e| {
                PromptArenaError::database_operation(format!("查询参赛者信息失败: {e}"))
            })?;
        let participant_map: HashMap<i64, _> =
            participants.into_iter().map(|p| (p.id, p)).collect();

        let assignments = Assignments::find()
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询赛题信息失败: {e}")))?;
        let assignment_map: HashMap<i64, _> = assignments.into_iter().map(|a| (a.id, a)).collect();

        // 组装 SubmissionListItem
        let items = submissions
            .into_iter()
            .map(|s| SubmissionListItem {
                id: s.id,
                participant_id: s.participant_id,
                participant_name: participant_map
                    .get(&s.participant_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "알 수 없는 참가자".to_string()),
                assignment_id: s.assignment_id,
                assignment_name: assignment_map
                    .get(&s.assignment_id)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| "알 수 없는 과제".to_string()),
                status: s.status,
                score: s.score,
                feedback: s.feedback,
                grading_details: s.grading_details,
                submitted_at: chrono::DateTime::from_timestamp(s.submitted_at, 0)
                    .map(|dt| dt.to_rfc3339())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 批次快照：取出全部 pending 提交及其赛题任务描述
    ///
    /// 快照只取一次，之后入库的提交不属于本轮批次。
    pub async fn list_pending_submissions_impl(
        &self,
        competition_id: i64,
    ) -> Result<Vec<PendingSubmission>> {
        let results = Submissions::find()
            .filter(Column::CompetitionId.eq(competition_id))
            .filter(Column::Status.eq(SubmissionStatus::PENDING))
            .find_also_related(Assignments)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PromptArenaError::database_operation(format!("查询待评分提交失败: {e}"))
            })?;

        Ok(results
            .into_iter()
            .filter_map(|(submission, assignment)| match assignment {
                Some(assignment) => Some(PendingSubmission {
                    id: submission.id,
                    prompt_text: submission.prompt_text,
                    assignment_prompt: assignment.prompt,
                }),
                None => {
                    warn!(
                        "Submission {} references missing assignment {}, skipping",
                        submission.id, submission.assignment_id
                    );
                    None
                }
            })
            .collect())
    }

    /// 更新提交状态
    pub async fn update_submission_status_impl(
        &self,
        submission_id: i64,
        status: SubmissionStatus,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(Column::Status, Expr::value(status.to_string()))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 写入评分成功终态
    pub async fn complete_submission_impl(
        &self,
        submission_id: i64,
        score: f64,
        feedback: &str,
        grading_details: &str,
    ) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Completed.to_string()),
            )
            .col_expr(Column::Score, Expr::value(score))
            .col_expr(Column::Feedback, Expr::value(feedback.to_string()))
            .col_expr(
                Column::GradingDetails,
                Expr::value(grading_details.to_string()),
            )
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("写入评分结果失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 写入评分失败终态（分数清空，反馈为诊断串）
    pub async fn fail_submission_impl(&self, submission_id: i64, feedback: &str) -> Result<bool> {
        let result = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Error.to_string()),
            )
            .col_expr(Column::Score, Expr::value(None::<f64>))
            .col_expr(Column::Feedback, Expr::value(feedback.to_string()))
            .filter(Column::Id.eq(submission_id))
            .exec(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("写入评分失败状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按状态统计提交数量
    pub async fn count_submissions_by_status_impl(
        &self,
        competition_id: i64,
    ) -> Result<GradingStatusResponse> {
        let rows: Vec<(String, i64)> = Submissions::find()
            .select_only()
            .column(Column::Status)
            .column_as(Column::Id.count(), "count")
            .filter(Column::CompetitionId.eq(competition_id))
            .group_by(Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("统计提交状态失败: {e}")))?;

        let mut counts = GradingStatusResponse::default();
        for (status, count) in rows {
            counts.total += count;
            match status.as_str() {
                SubmissionStatus::PENDING => counts.pending = count,
                SubmissionStatus::GRADING => counts.grading = count,
                SubmissionStatus::COMPLETED => counts.completed = count,
                SubmissionStatus::ERROR => counts.error = count,
                other => warn!("Unknown submission status in store: {}", other),
            }
        }

        Ok(counts)
    }

    /// 列出已完成评分的提交
    pub async fn list_completed_submissions_impl(
        &self,
        competition_id: i64,
    ) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::CompetitionId.eq(competition_id))
            .filter(Column::Status.eq(SubmissionStatus::COMPLETED))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| {
                PromptArenaError::database_operation(format!("查询已评分提交失败: {e}"))
            })?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }
}
