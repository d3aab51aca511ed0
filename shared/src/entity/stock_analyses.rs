//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "stock_analyses")]
pub struct Model {
    // UUID v4 assigned by the router at creation
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: i64,
    pub ticker: String,
    pub country: String,
    pub start_date: String,
    pub end_date: String,
    pub interval: String,
    pub feature_preset: String,
    #[sea_orm(column_type = "Json")]
    pub selected_features: Json,
    #[sea_orm(column_type = "Json")]
    pub selected_models: Json,
    pub forecast_horizon: i32,
    pub training_window: String,
    pub status: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub results: Option<Json>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::model_results::Entity")]
    ModelResults,
    #[sea_orm(has_many = "super::export_histories::Entity")]
    ExportHistories,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::model_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModelResults.def()
    }
}

impl Related<super::export_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExportHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
