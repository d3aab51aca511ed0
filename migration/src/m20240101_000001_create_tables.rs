use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users first, everything else hangs off it
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).big_integer().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).text().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StockAnalyses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(StockAnalyses::Id).char_len(36).not_null().primary_key())
                    .col(ColumnDef::new(StockAnalyses::UserId).big_integer().not_null())
                    .col(ColumnDef::new(StockAnalyses::Ticker).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::Country).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::StartDate).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::EndDate).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::Interval).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::FeaturePreset).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::SelectedFeatures).json().not_null())
                    .col(ColumnDef::new(StockAnalyses::SelectedModels).json().not_null())
                    .col(ColumnDef::new(StockAnalyses::ForecastHorizon).integer().not_null())
                    .col(ColumnDef::new(StockAnalyses::TrainingWindow).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::Status).string().not_null())
                    .col(ColumnDef::new(StockAnalyses::Results).json().null())
                    .col(ColumnDef::new(StockAnalyses::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .col(ColumnDef::new(StockAnalyses::UpdatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_analyses_user")
                            .from(StockAnalyses::Table, StockAnalyses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ModelResults::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ModelResults::Id).big_unsigned().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ModelResults::AnalysisId).char_len(36).not_null())
                    .col(ColumnDef::new(ModelResults::ModelName).string().not_null())
                    .col(ColumnDef::new(ModelResults::Mae).double().null())
                    .col(ColumnDef::new(ModelResults::Rmse).double().null())
                    .col(ColumnDef::new(ModelResults::Mape).double().null())
                    .col(ColumnDef::new(ModelResults::SharpeRatio).double().null())
                    .col(ColumnDef::new(ModelResults::TrainingStatus).string().not_null())
                    .col(ColumnDef::new(ModelResults::Predictions).json().null())
                    .col(ColumnDef::new(ModelResults::ConfidenceIntervals).json().null())
                    .col(ColumnDef::new(ModelResults::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_model_results_analysis")
                            .from(ModelResults::Table, ModelResults::AnalysisId)
                            .to(StockAnalyses::Table, StockAnalyses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExportHistories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExportHistories::Id).big_unsigned().not_null().auto_increment().primary_key())
                    .col(ColumnDef::new(ExportHistories::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ExportHistories::AnalysisId).char_len(36).not_null())
                    .col(ColumnDef::new(ExportHistories::ExportType).string().not_null())
                    .col(ColumnDef::new(ExportHistories::FileName).string().not_null())
                    .col(ColumnDef::new(ExportHistories::FilePath).text().null())
                    .col(ColumnDef::new(ExportHistories::ShareLink).text().null())
                    .col(ColumnDef::new(ExportHistories::CreatedAt).timestamp().not_null().default(Expr::cust("CURRENT_TIMESTAMP")))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_export_histories_user")
                            .from(ExportHistories::Table, ExportHistories::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_export_histories_analysis")
                            .from(ExportHistories::Table, ExportHistories::AnalysisId)
                            .to(StockAnalyses::Table, StockAnalyses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order
        manager
            .drop_table(Table::drop().table(ExportHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModelResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StockAnalyses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StockAnalyses {
    Table,
    Id,
    UserId,
    Ticker,
    Country,
    StartDate,
    EndDate,
    Interval,
    FeaturePreset,
    SelectedFeatures,
    SelectedModels,
    ForecastHorizon,
    TrainingWindow,
    Status,
    Results,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ModelResults {
    Table,
    Id,
    AnalysisId,
    ModelName,
    Mae,
    Rmse,
    Mape,
    SharpeRatio,
    TrainingStatus,
    Predictions,
    ConfidenceIntervals,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ExportHistories {
    Table,
    Id,
    UserId,
    AnalysisId,
    ExportType,
    FileName,
    FilePath,
    ShareLink,
    CreatedAt,
}
