use std::sync::Arc;

use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use shared::entity::export_histories;

pub struct ExportRepository {
    db: Arc<DatabaseConnection>,
}

impl ExportRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        active_model: export_histories::ActiveModel,
    ) -> Result<export_histories::Model> {
        let record = export_histories::Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await?;
        Ok(record)
    }

    pub async fn list_by_user(&self, user_id: i64) -> Result<Vec<export_histories::Model>> {
        let records = export_histories::Entity::find()
            .filter(export_histories::Column::UserId.eq(user_id))
            .order_by_asc(export_histories::Column::Id)
            .all(self.db.as_ref())
            .await?;
        Ok(records)
    }
}
