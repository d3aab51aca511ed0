use std::sync::Arc;

use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use shared::entity::users;

pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i64) -> Result<Option<users::Model>> {
        let user = users::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await?;
        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;
        Ok(user)
    }

    pub async fn create(&self, active_model: users::ActiveModel) -> Result<users::Model> {
        let user = users::Entity::insert(active_model)
            .exec_with_returning(self.db.as_ref())
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn owner() -> users::Model {
        users::Model {
            id: 1,
            username: "forecastlab".to_string(),
            password: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn find_by_id_distinguishes_present_and_absent() {
        let db = MockDatabase::new(DatabaseBackend::MySql)
            .append_query_results([vec![owner()]])
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();
        let repo = UserRepository::new(Arc::new(db));

        let found = repo.find_by_id(1).await.unwrap();
        assert_eq!(found.unwrap().username, "forecastlab");
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }
}
