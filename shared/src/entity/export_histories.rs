//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "export_histories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u64,
    pub user_id: i64,
    pub analysis_id: String,
    // One of: csv, json, pdf, link
    pub export_type: String,
    pub file_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub file_path: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub share_link: Option<String>,
    pub created_at: DateTimeUtc,
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
    #[sea_orm(
        belongs_to = "super::stock_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::stock_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    StockAnalyses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::stock_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
