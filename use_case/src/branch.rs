use time::OffsetDateTime;

use domain::{
    DomainErrorKind, DomainResult, domain_error,
    models::{Branch, BranchCode, BranchId, BranchUpdateInput},
    repositories::BranchRepository,
};

/// ブランチユースケース
pub struct BranchUseCase<R>
where
    R: BranchRepository,
{
    /// ブランチリポジトリ
    pub branch_repo: R,
}

impl<R> BranchUseCase<R>
where
    R: BranchRepository,
{
    /// ブランチユースケースを作成する。
    pub fn new(branch_repo: R) -> Self {
        Self { branch_repo }
    }

    /// ブランチをIDで取得する。
    ///
    /// ブランチが存在しない場合はエラーを返す。
    #[tracing::instrument(skip(self))]
    pub async fn by_id(&self, id: BranchId) -> DomainResult<Branch> {
        self.branch_repo.by_id(id).await?.ok_or_else(|| {
            tracing::debug!("branch not found");
            domain_error(
                DomainErrorKind::NotFound,
                format!("Branch with id {} not found", id),
            )
        })
    }

    /// ブランチをブランチコードで取得する。
    ///
    /// ブランチが存在しない場合は`None`を返す。
    #[tracing::instrument(skip(self))]
    pub async fn by_code(&self, code: &BranchCode) -> DomainResult<Option<Branch>> {
        self.branch_repo.by_code(code).await
    }

    /// すべてのブランチをリストする。
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> DomainResult<Vec<Branch>> {
        self.branch_repo.list().await
    }

    /// ブランチを新規作成する。
    ///
    /// リポジトリの`save`は同じIDのブランチを上書きするため、
    /// 既存のブランチと同じIDを持つブランチを渡すと、そのブランチが置き換わる。
    /// 新しいブランチは`Branch::new`でIDを採番して作成すること。
    #[tracing::instrument(skip(self, branch), fields(code = %branch.code))]
    pub async fn create(&self, branch: Branch) -> DomainResult<Branch> {
        let branch = self.branch_repo.save(branch).await?;
        tracing::info!(id = %branch.id, "branch created");
        Ok(branch)
    }

    /// ブランチコードで指定したブランチを更新する。
    ///
    /// 更新内容で値が指定されている項目のみ上書きして保存する。
    /// ブランチが存在しない場合はエラーを返す。
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        code: &BranchCode,
        input: BranchUpdateInput,
    ) -> DomainResult<Branch> {
        let mut branch = self.branch_repo.by_code(code).await?.ok_or_else(|| {
            domain_error(
                DomainErrorKind::NotFound,
                format!("Branch with code {} not found", code),
            )
        })?;
        branch.apply(input, OffsetDateTime::now_utc());
        let branch = self.branch_repo.save(branch).await?;
        tracing::info!(id = %branch.id, "branch updated");
        Ok(branch)
    }
}
