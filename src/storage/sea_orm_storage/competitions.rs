//! 竞赛存储操作

use super::SeaOrmStorage;
use crate::entity::competitions::{ActiveModel, Column, Entity as Competitions};
use crate::errors::{PromptArenaError, Result};
use crate::models::competitions::{entities::Competition, requests::CreateCompetitionRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建竞赛
    pub async fn create_competition_impl(
        &self,
        req: CreateCompetitionRequest,
    ) -> Result<Competition> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("创建竞赛失败: {e}")))?;

        Ok(result.into_competition())
    }

    /// 通过 ID 获取竞赛
    pub async fn get_competition_by_id_impl(&self, id: i64) -> Result<Option<Competition>> {
        let result = Competitions::find()
            .filter(Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询竞赛失败: {e}")))?;

        Ok(result.map(|m| m.into_competition()))
    }

    /// 列出全部竞赛（按创建时间倒序）
    pub async fn list_competitions_impl(&self) -> Result<Vec<Competition>> {
        let results = Competitions::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| PromptArenaError::database_operation(format!("查询竞赛列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_competition()).collect())
    }
}
