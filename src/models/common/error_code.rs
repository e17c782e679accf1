//! API 业务错误码
//!
//! 与 HTTP 状态码分离的业务级错误码，前端据此做细分提示。

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 请求参数类 40xxx
    BadRequest = 40000,
    InvalidQueryParams = 40001,
    InvalidJsonBody = 40002,

    // 文件/导入类 401xx
    FileUploadFailed = 40100,
    ImportFileParseFailed = 40101,
    ImportFileMissingColumn = 40102,
    ImportFileDataInvalid = 40103,

    // 资源不存在类 404xx
    NotFound = 40400,
    CompetitionNotFound = 40401,
    AssignmentNotFound = 40402,
    ParticipantNotFound = 40403,
    SubmissionNotFound = 40404,

    // 服务端类 500xx
    InternalServerError = 50000,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::CompetitionNotFound as i32, 40401);
        assert_eq!(ErrorCode::InternalServerError as i32, 50000);
    }
}
