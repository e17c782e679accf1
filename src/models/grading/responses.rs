use serde::Serialize;
use ts_rs::TS;

/// 评分启动确认
///
/// 批次在后台运行，调用方只拿到本轮入队数量；进度经由状态统计接口轮询。
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct StartGradingResponse {
    pub enqueued: i64,
}

/// 各状态提交数量统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct GradingStatusResponse {
    pub total: i64,
    pub pending: i64,
    pub grading: i64,
    pub completed: i64,
    pub error: i64,
}
