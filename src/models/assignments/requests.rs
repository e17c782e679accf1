use serde::Deserialize;
use ts_rs::TS;

// 创建赛题请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub name: String,
    pub prompt: String,
}
