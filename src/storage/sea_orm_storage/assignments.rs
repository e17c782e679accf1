//! 赛题存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{PromptArenaError, Result};
use crate::models::assignments::{entities::Assignment, requests::CreateAssignmentRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建赛题
    pub async fn create_assignment_impl(
        &self,
        competition_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            competition_id: Set(competition_id),
            name: Set(req.name),
            prompt: Set(req.prompt),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("创建赛题失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 列出竞赛下的全部赛题
    pub async fn list_assignments_impl(&self, competition_id: i64) -> Result<Vec<Assignment>> {
        let results = Assignments::find()
            .filter(Column::CompetitionId.eq(competition_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询赛题列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_assignment()).collect())
    }
}
