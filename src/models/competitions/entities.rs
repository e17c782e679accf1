use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 竞赛实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/competition.ts")]
pub struct Competition {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl crate::entity::competitions::Model {
    pub fn into_competition(self) -> Competition {
        Competition {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
