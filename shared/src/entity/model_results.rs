//! `SeaORM` Entity, @generated manually

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "model_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: u64,
    pub analysis_id: String,
    pub model_name: String,
    // Error metrics stay NULL until the compute service reports them
    #[sea_orm(nullable)]
    pub mae: Option<f64>,
    #[sea_orm(nullable)]
    pub rmse: Option<f64>,
    #[sea_orm(nullable)]
    pub mape: Option<f64>,
    #[sea_orm(nullable)]
    pub sharpe_ratio: Option<f64>,
    pub training_status: String,
    #[sea_orm(column_type = "Json", nullable)]
    pub predictions: Option<Json>,
    #[sea_orm(column_type = "Json", nullable)]
    pub confidence_intervals: Option<Json>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::stock_analyses::Entity",
        from = "Column::AnalysisId",
        to = "super::stock_analyses::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    StockAnalyses,
}

impl Related<super::stock_analyses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockAnalyses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
