use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::primitives::Id;
use crate::{DomainError, DomainErrorKind, DomainResult, domain_error, impl_string_primitive};

/// ブランチID
pub type BranchId = Id<Branch>;

/// ブランチコード
///
/// 業務上ブランチを一意に識別する短いコード
#[derive(Debug, Clone, PartialEq, Eq, Hash, garde::Validate)]
pub struct BranchCode(#[garde(length(chars, min = 1, max = 20))] pub String);
impl_string_primitive!(BranchCode);

/// ブランチ名
#[derive(Debug, Clone, PartialEq, Eq, garde::Validate)]
pub struct BranchName(#[garde(length(chars, min = 1, max = 100))] pub String);
impl_string_primitive!(BranchName);

/// ブランチ住所
#[derive(Debug, Clone, PartialEq, Eq, garde::Validate)]
pub struct BranchAddress(#[garde(length(chars, min = 1, max = 255))] pub String);
impl_string_primitive!(BranchAddress);

/// 電話番号
#[derive(Debug, Clone, PartialEq, Eq, garde::Validate)]
pub struct PhoneNumber(#[garde(length(chars, min = 1, max = 20))] pub String);
impl_string_primitive!(PhoneNumber);

/// ブランチ
///
/// デシリアライズするときは`Branch::restore`と同じドメインルールを検証する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "BranchRecord")]
pub struct Branch {
    /// ID
    pub id: BranchId,
    /// ブランチコード
    pub code: BranchCode,
    /// ブランチ名
    pub name: BranchName,
    /// 住所
    pub address: Option<BranchAddress>,
    /// 電話番号
    pub phone_number: Option<PhoneNumber>,
    /// 作成日時
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// 更新日時
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Branch {
    /// ブランチを新規作成する。
    ///
    /// IDは新しく採番し、作成日時と更新日時には`now`を設定する。
    pub fn new(
        code: BranchCode,
        name: BranchName,
        address: Option<BranchAddress>,
        phone_number: Option<PhoneNumber>,
        now: OffsetDateTime,
    ) -> Self {
        Self {
            id: BranchId::default(),
            code,
            name,
            address,
            phone_number,
            created_at: now,
            updated_at: now,
        }
    }

    /// 永続化された値からブランチを復元する。
    ///
    /// # ドメインルール
    ///
    /// - 作成日時は更新日時と同じか、更新日時よりも前でなくてはならない。
    pub fn restore(
        id: BranchId,
        code: BranchCode,
        name: BranchName,
        address: Option<BranchAddress>,
        phone_number: Option<PhoneNumber>,
        created_at: OffsetDateTime,
        updated_at: OffsetDateTime,
    ) -> DomainResult<Self> {
        if created_at > updated_at {
            return Err(domain_error(
                DomainErrorKind::Validation,
                "created_at must be less than or equal to updated_at",
            ));
        }
        Ok(Self {
            id,
            code,
            name,
            address,
            phone_number,
            created_at,
            updated_at,
        })
    }

    /// 更新内容をブランチに反映する。
    ///
    /// 更新内容で値が指定されている項目のみ上書きする。
    /// ID、ブランチコード及び作成日時は変更しない。
    pub fn apply(&mut self, input: BranchUpdateInput, now: OffsetDateTime) {
        let BranchUpdateInput {
            name,
            address,
            phone_number,
        } = input;
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(address) = address {
            self.address = Some(address);
        }
        if let Some(phone_number) = phone_number {
            self.phone_number = Some(phone_number);
        }
        // 時計が巻き戻っても作成日時より前にはしない
        self.updated_at = now.max(self.created_at);
    }
}

/// デシリアライズしたブランチの値
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchRecord {
    id: BranchId,
    code: BranchCode,
    name: BranchName,
    address: Option<BranchAddress>,
    phone_number: Option<PhoneNumber>,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

impl TryFrom<BranchRecord> for Branch {
    type Error = DomainError;

    fn try_from(record: BranchRecord) -> Result<Self, Self::Error> {
        Branch::restore(
            record.id,
            record.code,
            record.name,
            record.address,
            record.phone_number,
            record.created_at,
            record.updated_at,
        )
    }
}

/// ブランチ更新内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchUpdateInput {
    /// ブランチ名
    pub name: Option<BranchName>,
    /// 住所
    pub address: Option<BranchAddress>,
    /// 電話番号
    pub phone_number: Option<PhoneNumber>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Duration, macros::datetime};

    fn create_branch() -> Branch {
        Branch::new(
            BranchCode::new(String::from("QTO01")).unwrap(),
            BranchName::new(String::from("Quito Centro")).unwrap(),
            Some(BranchAddress::new(String::from("Av. Amazonas N34")).unwrap()),
            None,
            datetime!(2025-01-01 00:00:00 UTC),
        )
    }

    #[test]
    fn branch_new() {
        let branch = create_branch();

        assert!(!branch.id.0.is_nil());
        assert_eq!(branch.code.0, "QTO01");
        assert_eq!(branch.name.0, "Quito Centro");
        assert_eq!(branch.address.unwrap().0, "Av. Amazonas N34");
        assert_eq!(branch.phone_number, None);
        assert_eq!(branch.created_at, branch.updated_at);
    }

    #[rstest::rstest]
    #[case(String::from("QTO01"), true)]
    #[case(String::from(" QTO01 "), true)]
    #[case(String::new(), false)]
    #[case("A".repeat(20), true)]
    #[case("A".repeat(21), false)]
    fn branch_code_new(#[case] value: String, #[case] expected: bool) {
        assert_eq!(BranchCode::new(value).is_ok(), expected);
    }

    #[rstest::rstest]
    #[case(datetime!(2025-01-01 00:00:00 UTC), datetime!(2025-01-01 00:00:00 UTC), true)]
    #[case(datetime!(2025-01-01 00:00:00 UTC), datetime!(2025-01-01 00:00:01 UTC), true)]
    #[case(datetime!(2025-01-01 00:00:01 UTC), datetime!(2025-01-01 00:00:00 UTC), false)]
    fn branch_restore(
        #[case] created_at: OffsetDateTime,
        #[case] updated_at: OffsetDateTime,
        #[case] expected: bool,
    ) {
        let result = Branch::restore(
            BranchId::default(),
            BranchCode::new(String::from("GYE01")).unwrap(),
            BranchName::new(String::from("Guayaquil")).unwrap(),
            None,
            None,
            created_at,
            updated_at,
        );
        if expected {
            assert!(result.is_ok(), "{}", result.err().unwrap());
        } else {
            let error = result.unwrap_err();
            assert_eq!(error.kind, DomainErrorKind::Validation);
        }
    }

    #[test]
    fn apply_overwrites_only_supplied_fields() {
        let mut branch = create_branch();
        let original = branch.clone();
        let now = original.created_at + Duration::hours(1);
        let input = BranchUpdateInput {
            name: Some(BranchName::new(String::from("Updated Name")).unwrap()),
            ..Default::default()
        };

        branch.apply(input, now);

        assert_eq!(branch.name.0, "Updated Name");
        assert_eq!(branch.id, original.id);
        assert_eq!(branch.code, original.code);
        assert_eq!(branch.address, original.address);
        assert_eq!(branch.phone_number, original.phone_number);
        assert_eq!(branch.created_at, original.created_at);
        assert_eq!(branch.updated_at, now);
    }

    #[test]
    fn apply_sets_optional_fields() {
        let mut branch = create_branch();
        let input = BranchUpdateInput {
            name: None,
            address: Some(BranchAddress::new(String::from("Calle Larga 1-23")).unwrap()),
            phone_number: Some(PhoneNumber::new(String::from("+593-2-2999999")).unwrap()),
        };

        branch.apply(input, branch.created_at);

        assert_eq!(branch.name.0, "Quito Centro");
        assert_eq!(branch.address.unwrap().0, "Calle Larga 1-23");
        assert_eq!(branch.phone_number.unwrap().0, "+593-2-2999999");
    }

    #[test]
    fn apply_never_moves_updated_at_before_created_at() {
        let mut branch = create_branch();
        let created_at = branch.created_at;

        branch.apply(BranchUpdateInput::default(), created_at - Duration::days(1));

        assert_eq!(branch.updated_at, created_at);
    }

    #[test]
    fn branch_serializes_in_camel_case() {
        let branch = create_branch();
        let value = serde_json::to_value(&branch).unwrap();

        assert_eq!(value["code"], "QTO01");
        assert_eq!(value["phoneNumber"], serde_json::Value::Null);
        assert_eq!(value["createdAt"], "2025-01-01T00:00:00Z");
        let restored = serde_json::from_value::<Branch>(value).unwrap();
        assert_eq!(restored, branch);
    }

    #[test]
    fn branch_deserialization_rejects_updated_at_before_created_at() {
        let mut value = serde_json::to_value(create_branch()).unwrap();
        value["updatedAt"] = serde_json::Value::from("2024-12-31T23:59:59Z");

        let result = serde_json::from_value::<Branch>(value);

        let error = result.unwrap_err();
        assert!(
            error.to_string().contains("created_at must be less than or equal to updated_at"),
            "{}",
            error
        );
    }
}
