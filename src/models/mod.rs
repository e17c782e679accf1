pub mod common;

pub mod assignments;
pub mod competitions;
pub mod grading;
pub mod participants;
pub mod reports;
pub mod submissions;

pub use common::error_code::ErrorCode;
pub use common::pagination::PaginationInfo;
pub use common::response::ApiResponse;

/// 应用启动时间，用于系统信息接口的运行时长统计
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
