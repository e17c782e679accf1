use serde::Serialize;
use ts_rs::TS;

use crate::models::PaginationInfo;

/// 提交列表项（附带参赛者与赛题名称）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub participant_id: i64,
    pub participant_name: String,
    pub assignment_id: i64,
    pub assignment_name: String,
    pub status: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub grading_details: Option<String>,
    pub submitted_at: String,
}

/// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

/// 提交文件上传结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionUploadResponse {
    pub uploaded: usize,
    pub skipped: Vec<String>,
}
