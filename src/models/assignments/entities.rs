use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属竞赛 ID
    pub competition_id: i64,
    // 赛题名称
    pub name: String,
    // 任务描述，评估时作为控制指令下发给模型
    pub prompt: String,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl crate::entity::assignments::Model {
    pub fn into_assignment(self) -> Assignment {
        Assignment {
            id: self.id,
            competition_id: self.competition_id,
            name: self.name,
            prompt: self.prompt,
            created_at: chrono::DateTime::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
