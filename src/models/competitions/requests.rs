use serde::Deserialize;
use ts_rs::TS;

// 创建竞赛请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/competition.ts")]
pub struct CreateCompetitionRequest {
    pub name: String,
    pub description: Option<String>,
}
