use crate::{
    DomainResult,
    models::{Branch, BranchCode, BranchId},
};

/// ブランチリポジトリ
///
/// ブランチIDとブランチコードの一意性はリポジトリが保証する。
#[async_trait::async_trait]
pub trait BranchRepository: Sync + Send {
    /// ブランチをIDで取得する。
    async fn by_id(&self, id: BranchId) -> DomainResult<Option<Branch>>;

    /// ブランチをブランチコードで取得する。
    async fn by_code(&self, code: &BranchCode) -> DomainResult<Option<Branch>>;

    /// ブランチをリストする。
    async fn list(&self) -> DomainResult<Vec<Branch>>;

    /// ブランチを保存する。
    ///
    /// 同じIDのブランチが存在する場合は更新し、存在しない場合は登録する。
    /// ブランチコードが他のブランチと重複する場合は`DomainErrorKind::Conflict`を返す。
    async fn save(&self, branch: Branch) -> DomainResult<Branch>;
}
