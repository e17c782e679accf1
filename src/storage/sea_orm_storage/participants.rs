//! 参赛者存储操作

use super::SeaOrmStorage;
use crate::entity::participants::{ActiveModel, Column, Entity as Participants};
use crate::errors::{PromptArenaError, Result};
use crate::models::participants::entities::{NewParticipant, Participant};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 批量创建参赛者
    pub async fn create_participants_impl(
        &self,
        competition_id: i64,
        participants: Vec<NewParticipant>,
    ) -> Result<usize> {
        if participants.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = participants.len();

        let models: Vec<ActiveModel> = participants
            .into_iter()
            .map(|p| ActiveModel {
                competition_id: Set(competition_id),
                name: Set(p.name),
                email: Set(p.email),
                student_id: Set(p.student_id),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();

        Participants::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("批量创建参赛者失败: {e}")))?;

        Ok(count)
    }

    /// 列出竞赛下的全部参赛者
    pub async fn list_participants_impl(&self, competition_id: i64) -> Result<Vec<Participant>> {
        let results = Participants::find()
            .filter(Column::CompetitionId.eq(competition_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询参赛者列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_participant()).collect())
    }
}
