use serde::Serialize;
use ts_rs::TS;

use super::entities::Competition;
use crate::models::assignments::entities::Assignment;
use crate::models::participants::entities::Participant;
use crate::models::submissions::responses::SubmissionListItem;

/// 竞赛详情响应（聚合赛题、参赛者与提交）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/competition.ts")]
pub struct CompetitionDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub competition: Competition,
    pub assignments: Vec<Assignment>,
    pub participants: Vec<Participant>,
    pub submissions: Vec<SubmissionListItem>,
}
