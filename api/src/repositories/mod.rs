mod analysis_repository;
mod export_repository;
mod model_result_repository;
mod user_repository;

pub use analysis_repository::AnalysisRepository;
pub use export_repository::ExportRepository;
pub use model_result_repository::ModelResultRepository;
pub use user_repository::UserRepository;
