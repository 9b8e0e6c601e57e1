mod branch;

pub use branch::*;

use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, Transaction};

use domain::{DomainError, DomainErrorKind, DomainResult};

/// PostgreSQLトランザクション
pub type PgTransaction<'a> = Transaction<'a, Postgres>;

/// PostgreSQLリポジトリ
pub struct PgRepository<T> {
    pub pool: PgPool,
    pub _marker: PhantomData<T>,
}

impl<T> PgRepository<T> {
    /// PostgreSQLリポジトリを作成する。
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// トランザクションを開始する。
    ///
    /// # 戻り値
    ///
    /// トランザクション
    pub async fn begin(&self) -> DomainResult<PgTransaction<'_>> {
        self.pool.begin().await.map_err(repository_error)
    }
}

/// トランザクションをコミットする。
///
/// # 引数
///
/// * `tx`: トランザクション
pub async fn commit(tx: PgTransaction<'_>) -> DomainResult<()> {
    tx.commit().await.map_err(repository_error)
}

/// sqlxのエラーをドメインエラーに変換する。
///
/// 一意制約違反は`Conflict`、それ以外は`Repository`に分類する。
pub fn repository_error(e: sqlx::Error) -> DomainError {
    let kind = match e.as_database_error() {
        Some(db_error) if db_error.is_unique_violation() => DomainErrorKind::Conflict,
        _ => DomainErrorKind::Repository,
    };
    DomainError {
        kind,
        messages: vec![e.to_string().into()],
        source: e.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(sqlx::Error::RowNotFound)]
    #[case(sqlx::Error::PoolTimedOut)]
    #[case(sqlx::Error::PoolClosed)]
    fn repository_error_classifies_non_database_errors(#[case] e: sqlx::Error) {
        let message = e.to_string();
        let error = repository_error(e);
        assert_eq!(error.kind, DomainErrorKind::Repository);
        assert_eq!(error.messages, vec![message]);
    }
}
