use std::borrow::Cow;

pub mod models;
pub mod repositories;

/// ドメインエラーの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    /// 検証エラー
    Validation,
    /// エンティティが存在しない
    NotFound,
    /// 一意制約違反
    Conflict,
    /// リポジトリエラー
    Repository,
}

/// ドメインエラー
///
/// ブランチのCRUD操作で発生したエラーを表現する。
#[derive(Debug, thiserror::Error)]
#[error("{}", .messages.join(", "))]
pub struct DomainError {
    /// エラーの種類
    pub kind: DomainErrorKind,
    /// エラーメッセージ
    pub messages: Vec<Cow<'static, str>>,
    /// エラーの原因
    pub source: anyhow::Error,
}

/// ドメイン結果
pub type DomainResult<T> = Result<T, DomainError>;

/// メッセージからドメインエラーを作成する。
pub fn domain_error<M>(kind: DomainErrorKind, message: M) -> DomainError
where
    M: Into<Cow<'static, str>>,
{
    let message = message.into();
    DomainError {
        kind,
        source: anyhow::anyhow!(message.to_string()),
        messages: vec![message],
    }
}

fn starts_or_ends_with_whitespace(s: &str) -> bool {
    s.chars().next().is_some_and(|ch| ch.is_whitespace())
        || s.chars().last().is_some_and(|ch| ch.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("abc", false)]
    #[case(" abc", true)]
    #[case("abc ", true)]
    #[case("\tabc\n", true)]
    #[case("a b c", false)]
    #[case("", false)]
    fn starts_or_ends_with_whitespace_works(#[case] s: &str, #[case] expected: bool) {
        assert_eq!(starts_or_ends_with_whitespace(s), expected);
    }

    #[test]
    fn domain_error_keeps_kind_and_message() {
        let error = domain_error(DomainErrorKind::NotFound, "Branch not found");
        assert_eq!(error.kind, DomainErrorKind::NotFound);
        assert_eq!(error.messages, vec![Cow::Borrowed("Branch not found")]);
        assert_eq!(error.to_string(), "Branch not found");
    }
}
