use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;

/// アプリケーション設定
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    /// データベース設定
    pub database: DatabaseSettings,
    /// ログ設定
    pub log: LogSettings,
}

/// データベース設定
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// ユーザー名
    pub user: String,
    /// パスワード
    pub password: SecretString,
    /// データベース名
    pub name: String,
    /// 最大接続数
    pub max_connections: u32,
    /// 接続タイムアウト（秒）
    pub connection_timeout: u64,
}

/// ログ設定
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LogSettings {
    /// ログレベル
    ///
    /// 環境変数`RUST_LOG`が設定されている場合は、そちらを優先する。
    pub level: log::Level,
}

impl DatabaseSettings {
    /// データベース接続オプションを返す。
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_settings() -> DatabaseSettings {
        DatabaseSettings {
            host: String::from("localhost"),
            port: 5432,
            user: String::from("banking"),
            password: SecretString::new("secret".into()),
            name: String::from("branch_db"),
            max_connections: 5,
            connection_timeout: 3,
        }
    }

    #[test]
    fn database_connect_options() {
        let options = database_settings().connect_options();
        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_port(), 5432);
        assert_eq!(options.get_username(), "banking");
        assert_eq!(options.get_database(), Some("branch_db"));
    }

    #[test]
    fn password_is_not_printed() {
        let settings = database_settings();
        assert!(!format!("{:?}", settings).contains("secret"));
    }
}
