use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 提交状态
//
// 状态机：pending --(出队)--> grading --(全部轮次成功)--> completed
//                             grading --(评分失败)--> error
// completed 与 error 为本轮批次的终态，重新入队由外部负责。
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub enum SubmissionStatus {
    Pending,   // 待评分
    Grading,   // 评分中
    Completed, // 评分完成
    Error,     // 评分失败
}

impl SubmissionStatus {
    pub const PENDING: &'static str = "pending";
    pub const GRADING: &'static str = "grading";
    pub const COMPLETED: &'static str = "completed";
    pub const ERROR: &'static str = "error";
}

impl<'de> Deserialize<'de> for SubmissionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的提交状态: '{s}'. 支持的状态: pending, grading, completed, error"
            ))
        })
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionStatus::Pending => write!(f, "{}", SubmissionStatus::PENDING),
            SubmissionStatus::Grading => write!(f, "{}", SubmissionStatus::GRADING),
            SubmissionStatus::Completed => write!(f, "{}", SubmissionStatus::COMPLETED),
            SubmissionStatus::Error => write!(f, "{}", SubmissionStatus::ERROR),
        }
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SubmissionStatus::PENDING => Ok(SubmissionStatus::Pending),
            SubmissionStatus::GRADING => Ok(SubmissionStatus::Grading),
            SubmissionStatus::COMPLETED => Ok(SubmissionStatus::Completed),
            SubmissionStatus::ERROR => Ok(SubmissionStatus::Error),
            _ => Err(format!("Invalid submission status: {s}")),
        }
    }
}

// 提交实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub competition_id: i64,
    pub participant_id: i64,
    pub assignment_id: i64,
    pub prompt_text: String,
    pub status: String,
    pub score: Option<f64>,
    pub feedback: Option<String>,
    // 逐轮得分明细，JSON 数组字符串，用于审计
    pub grading_details: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl crate::entity::submissions::Model {
    pub fn into_submission(self) -> Submission {
        Submission {
            id: self.id,
            competition_id: self.competition_id,
            participant_id: self.participant_id,
            assignment_id: self.assignment_id,
            prompt_text: self.prompt_text,
            status: self.status,
            score: self.score,
            feedback: self.feedback,
            grading_details: self.grading_details,
            submitted_at: chrono::DateTime::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
        }
    }
}

/// 待评分提交的快照行（附带赛题任务描述）
///
/// 批次开始时一次性取出，之后入库的提交不属于本轮批次。
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub id: i64,
    pub prompt_text: String,
    pub assignment_prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in ["pending", "grading", "completed", "error"] {
            let status: SubmissionStatus = s.parse().unwrap();
            assert_eq!(status.to_string(), s);
        }
    }

    #[test]
    fn test_status_rejects_unknown() {
        assert!("done".parse::<SubmissionStatus>().is_err());
    }
}
