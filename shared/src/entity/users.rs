//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    // Opaque credential blob, never interpreted by this layer
    #[sea_orm(column_type = "Text")]
    pub password: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_analyses::Entity")]
    StockAnalyses,
    #[sea_orm(has_many = "super::export_histories::Entity")]
    ExportHistories,
}

impl Related<super::stock_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockAnalyses.def()
    }
}

impl Related<super::export_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExportHistories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
