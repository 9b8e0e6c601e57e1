use once_cell::sync::Lazy;
use time::{OffsetDateTime, macros::datetime};

use domain::models::{Branch, BranchAddress, BranchCode, BranchName, PhoneNumber};
use infra::{AppState, BranchUseCaseImpl};
use settings::AppSettings;

use crate::helpers::{setup_database, teardown_database};

/// Timestamp used for the branches created by the test cases
///
/// It has no sub-microsecond part, so it survives the round trip through PostgreSQL.
pub const CREATED_AT: OffsetDateTime = datetime!(2025-06-01 09:00:00 UTC);

static TRACING: Lazy<()> = Lazy::new(|| {
    let subscriber = app::get_subscriber(String::from("test"), log::Level::Debug, std::io::stdout);
    app::init_subscriber(subscriber).unwrap();
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableTracing {
    Yes,
    No,
}

/// Test case for integration tests
///
/// ```
/// #[tokio::test]
/// #[ignore]
/// async fn integration_test_case_skeleton() {
///     let app_settings = load_app_settings_for_testing();
///     let test_case = TestCase::begin(app_settings, EnableTracing::No).await;
///
///     /************************************************************
///
///             Implement integration test logic here
///
///     *************************************************************/
///
///     test_case.end().await;
/// }
/// ```
pub struct TestCase {
    pub app_state: AppState,
}

impl TestCase {
    pub async fn begin(mut app_settings: AppSettings, tracing: EnableTracing) -> Self {
        if tracing == EnableTracing::Yes {
            Lazy::force(&TRACING);
        }
        let (database, pg_pool) = setup_database(app_settings.database.clone()).await;
        app_settings.database = database;
        Self {
            app_state: AppState {
                app_settings,
                pg_pool,
            },
        }
    }

    pub async fn end(self) {
        self.app_state.pg_pool.close().await;
        teardown_database(&self.app_state.app_settings.database).await;
    }

    pub fn use_case(&self) -> BranchUseCaseImpl {
        self.app_state.branch_use_case()
    }

    /// Registers a branch through the use case and returns the stored branch
    pub async fn register_branch(&self, code: &str, name: &str) -> Branch {
        self.use_case()
            .create(new_branch(code, name))
            .await
            .unwrap()
    }
}

pub fn branch_code(code: &str) -> BranchCode {
    BranchCode::new(code.to_string()).unwrap()
}

pub fn new_branch(code: &str, name: &str) -> Branch {
    Branch::new(
        branch_code(code),
        BranchName::new(name.to_string()).unwrap(),
        Some(BranchAddress::new(String::from("Av. Amazonas y Naciones Unidas")).unwrap()),
        Some(PhoneNumber::new(String::from("+593-2-2990000")).unwrap()),
        CREATED_AT,
    )
}
