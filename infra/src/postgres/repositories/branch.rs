use time::OffsetDateTime;
use uuid::Uuid;

use domain::{
    DomainError, DomainResult,
    models::{Branch, BranchCode, BranchId},
    repositories::BranchRepository,
};

use super::{PgRepository, PgTransaction, commit, repository_error};

pub type PgBranchRepository = PgRepository<Branch>;

#[async_trait::async_trait]
impl BranchRepository for PgBranchRepository {
    /// ブランチをIDで取得する。
    #[tracing::instrument(skip(self))]
    async fn by_id(&self, id: BranchId) -> DomainResult<Option<Branch>> {
        sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, code, name, address, phone_number, created_at, updated_at
            FROM branches
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?
        .map(Branch::try_from)
        .transpose()
    }

    /// ブランチをブランチコードで取得する。
    #[tracing::instrument(skip(self))]
    async fn by_code(&self, code: &BranchCode) -> DomainResult<Option<Branch>> {
        sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, code, name, address, phone_number, created_at, updated_at
            FROM branches
            WHERE code = $1
            "#,
        )
        .bind(&code.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(repository_error)?
        .map(Branch::try_from)
        .transpose()
    }

    /// ブランチをブランチコード順にリストする。
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> DomainResult<Vec<Branch>> {
        sqlx::query_as::<_, BranchRow>(
            r#"
            SELECT id, code, name, address, phone_number, created_at, updated_at
            FROM branches
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(repository_error)?
        .into_iter()
        .map(Branch::try_from)
        .collect::<Result<Vec<_>, _>>()
    }

    /// ブランチを保存する。
    ///
    /// 同じIDの行が存在する場合は、IDと作成日時以外を更新する。
    #[tracing::instrument(skip(self, branch), fields(id = %branch.id, code = %branch.code))]
    async fn save(&self, branch: Branch) -> DomainResult<Branch> {
        let mut tx = self.begin().await?;
        let row = sqlx::query_as::<_, BranchRow>(
            r#"
            INSERT INTO branches (
                id, code, name, address, phone_number, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET
                code = EXCLUDED.code,
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                phone_number = EXCLUDED.phone_number,
                updated_at = EXCLUDED.updated_at
            RETURNING id, code, name, address, phone_number, created_at, updated_at
            "#,
        )
        .bind(branch.id.0)
        .bind(branch.code.0)
        .bind(branch.name.0)
        .bind(branch.address.map(|a| a.0))
        .bind(branch.phone_number.map(|p| p.0))
        .bind(branch.created_at)
        .bind(branch.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(repository_error)?;
        branch_commit(tx, row).await
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BranchRow {
    id: Uuid,
    code: String,
    name: String,
    address: Option<String>,
    phone_number: Option<String>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<BranchRow> for Branch {
    type Error = DomainError;

    fn try_from(row: BranchRow) -> Result<Self, Self::Error> {
        Branch::restore(
            row.id.into(),
            row.code.try_into()?,
            row.name.try_into()?,
            row.address.map(|a| a.try_into()).transpose()?,
            row.phone_number.map(|p| p.try_into()).transpose()?,
            row.created_at,
            row.updated_at,
        )
    }
}

async fn branch_commit(tx: PgTransaction<'_>, row: BranchRow) -> DomainResult<Branch> {
    commit(tx).await?;
    Branch::try_from(row)
}

#[cfg(test)]
mod tests {
    use domain::DomainErrorKind;
    use time::macros::datetime;

    use super::*;

    fn branch_row() -> BranchRow {
        BranchRow {
            id: Uuid::new_v4(),
            code: String::from("UIO02"),
            name: String::from("Quito Norte"),
            address: Some(String::from("Av. de la Prensa")),
            phone_number: None,
            created_at: datetime!(2025-06-01 09:00:00 -05:00),
            updated_at: datetime!(2025-06-02 09:00:00 -05:00),
        }
    }

    #[test]
    fn branch_from_row() {
        let row = branch_row();
        let id = row.id;

        let branch = Branch::try_from(row).unwrap();

        assert_eq!(branch.id.0, id);
        assert_eq!(branch.code.0, "UIO02");
        assert_eq!(branch.name.0, "Quito Norte");
        assert_eq!(branch.address.unwrap().0, "Av. de la Prensa");
        assert!(branch.phone_number.is_none());
        assert_eq!(branch.created_at, datetime!(2025-06-01 09:00:00 -05:00));
    }

    #[rstest::rstest]
    #[case(BranchRow { code: String::new(), ..branch_row() })]
    #[case(BranchRow { name: "a".repeat(101), ..branch_row() })]
    #[case(BranchRow { address: Some(String::from("  ")), ..branch_row() })]
    #[case(BranchRow { updated_at: datetime!(2025-05-31 09:00:00 -05:00), ..branch_row() })]
    fn invalid_row_is_rejected(#[case] row: BranchRow) {
        let error = Branch::try_from(row).unwrap_err();
        assert_eq!(error.kind, DomainErrorKind::Validation);
    }
}
