use serde::Serialize;
use ts_rs::TS;

/// 导入单行错误
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participant.ts")]
pub struct ImportRowError {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// 参赛者导入结果
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participant.ts")]
pub struct ParticipantImportResponse {
    pub total: usize,
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}
