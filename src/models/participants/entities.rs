use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 参赛者实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/participant.ts")]
pub struct Participant {
    pub id: i64,
    pub competition_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 待入库的参赛者（导入流水线产物）
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
}

impl crate::entity::participants::Model {
    pub fn into_participant(self) -> Participant {
        Participant {
            id: self.id,
            competition_id: self.competition_id,
            name: self.name,
            email: self.email,
            student_id: self.student_id,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
