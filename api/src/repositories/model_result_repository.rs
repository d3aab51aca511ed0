use std::sync::Arc;

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use shared::entity::model_results;

pub struct ModelResultRepository {
    db: Arc<DatabaseConnection>,
}

impl ModelResultRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        active_model: model_results::ActiveModel,
    ) -> Result<model_results::Model> {
        let result = model_results::Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await?;
        Ok(result)
    }

    pub async fn find_by_analysis_and_model(
        &self,
        analysis_id: &str,
        model_name: &str,
    ) -> Result<Option<model_results::Model>> {
        let result = model_results::Entity::find()
            .filter(model_results::Column::AnalysisId.eq(analysis_id))
            .filter(model_results::Column::ModelName.eq(model_name))
            .one(self.db.as_ref())
            .await?;
        Ok(result)
    }

    pub async fn list_by_analysis(&self, analysis_id: &str) -> Result<Vec<model_results::Model>> {
        let results = model_results::Entity::find()
            .filter(model_results::Column::AnalysisId.eq(analysis_id))
            .order_by_asc(model_results::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(results)
    }

    pub async fn update(
        &self,
        active_model: model_results::ActiveModel,
    ) -> Result<Option<model_results::Model>> {
        match active_model.update(self.db.as_ref()).await {
            Ok(result) => Ok(Some(result)),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
