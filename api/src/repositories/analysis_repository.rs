use std::sync::Arc;

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use shared::entity::stock_analyses;

pub struct AnalysisRepository {
    db: Arc<DatabaseConnection>,
}

impl AnalysisRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        active_model: stock_analyses::ActiveModel,
    ) -> Result<stock_analyses::Model> {
        let analysis = active_model.insert(self.db.as_ref()).await?;
        Ok(analysis)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<stock_analyses::Model>> {
        let analysis = stock_analyses::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;
        Ok(analysis)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<stock_analyses::Model>> {
        let analyses = stock_analyses::Entity::find()
            .filter(stock_analyses::Column::UserId.eq(user_id))
            .order_by_asc(stock_analyses::Column::CreatedAt)
            .all(self.db.as_ref())
            .await?;
        Ok(analyses)
    }

    /// Partial merge of the set fields; `None` when the id does not exist.
    pub async fn update(
        &self,
        active_model: stock_analyses::ActiveModel,
    ) -> Result<Option<stock_analyses::Model>> {
        match active_model.update(self.db.as_ref()).await {
            Ok(analysis) => Ok(Some(analysis)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
