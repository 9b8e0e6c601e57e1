pub mod postgres;

use settings::AppSettings;
use use_case::branch::BranchUseCase;

use crate::postgres::repositories::PgBranchRepository;

/// PostgreSQLリポジトリを使用するブランチユースケース
pub type BranchUseCaseImpl = BranchUseCase<PgBranchRepository>;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub app_settings: AppSettings,
    pub pg_pool: sqlx::PgPool,
}

impl AppState {
    /// PostgreSQLリポジトリを使用するブランチユースケースを作成する。
    pub fn branch_use_case(&self) -> BranchUseCaseImpl {
        let branch_repo = PgBranchRepository::new(self.pg_pool.clone());
        BranchUseCase::new(branch_repo)
    }
}
