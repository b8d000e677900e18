#[cfg(test)]
pub mod test_utils {
    use crate::config::AppSettings;
    use crate::password;
    use crate::router::create_router_with_store;
    use crate::schemas::AppState;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{loan, user};
    use quota::LoanPeriod;
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
        QueryFilter, Set,
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower_sessions::MemoryStore;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// A running test server with its database and upload directory.
    ///
    /// The server keeps cookies between requests, so a login carries over to
    /// the following calls.
    pub struct TestApp {
        pub server: TestServer,
        pub db: DatabaseConnection,
        pub upload_dir: TempDir,
        _tracing: tracing::subscriber::DefaultGuard,
    }

    /// Test app with default settings.
    pub async fn spawn_app() -> TestApp {
        spawn_app_with(|_| {}).await
    }

    /// Test app with settings adjusted by `configure`. The upload directory
    /// is always a fresh temporary one.
    pub async fn spawn_app_with(configure: impl FnOnce(&mut AppSettings)) -> TestApp {
        let guard = init_test_tracing();

        let db = setup_test_db().await;
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let mut settings = AppSettings {
            upload_dir: upload_dir.path().to_path_buf(),
            ..AppSettings::default()
        };
        configure(&mut settings);

        let state = AppState {
            db: db.clone(),
            settings: Arc::new(settings),
        };
        let router = create_router_with_store(state, MemoryStore::default());

        let mut server = TestServer::new(router).expect("Failed to start test server");
        server.do_save_cookies();

        TestApp {
            server,
            db,
            upload_dir,
            _tracing: guard,
        }
    }

    /// Insert a member directly with a hashed password.
    pub async fn seed_member(db: &DatabaseConnection, nama: &str, plain_password: &str) -> user::Model {
        user::ActiveModel {
            nomor_keanggotaan: Set(format!("KOP-{}", nama)),
            nama: Set(nama.to_string()),
            divisi: Set("Produksi".to_string()),
            password: Set(password::hash(plain_password).expect("Failed to hash password")),
            foto: Set("/img/0_seed.png".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to seed member")
    }

    /// Insert `count` loan records for `member` in `period`.
    pub async fn seed_loans(db: &DatabaseConnection, member: &user::Model, period: LoanPeriod, count: usize) {
        for day in 1..=count {
            loan::ActiveModel {
                nomor_keanggotaan: Set(member.nomor_keanggotaan.clone()),
                nama: Set(member.nama.clone()),
                divisi: Set(member.divisi.clone()),
                pinjaman: Set(Decimal::new(1_000_000, 0)),
                cicilan: Set(10),
                cicilan_perbulan: Set(Decimal::new(100_000, 0)),
                tanggal: Set(format!("{:02}-{}-{}", day, period.month_label(), period.year)),
                date_month: Set(period.month_label()),
                date_year: Set(period.year),
                user_id: Set(member.id),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("Failed to seed loan");
        }
    }

    /// Loan records on file for `period`, across all members.
    pub async fn loans_in(db: &DatabaseConnection, period: LoanPeriod) -> u64 {
        loan::Entity::find()
            .filter(loan::Column::DateYear.eq(period.year))
            .filter(loan::Column::DateMonth.eq(period.month_label()))
            .count(db)
            .await
            .expect("Failed to count loans")
    }

    pub async fn user_count(db: &DatabaseConnection) -> u64 {
        user::Entity::find()
            .count(db)
            .await
            .expect("Failed to count users")
    }

    /// Log in through the form and check the redirect.
    pub async fn login(app: &TestApp, nama: &str, plain_password: &str) {
        let response = app
            .server
            .post("/login")
            .form(&[("nama", nama), ("password", plain_password)])
            .await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/landing");
    }

    /// A complete loan form for `member` dated `tanggal`.
    pub fn loan_form(member: &user::Model, tanggal: &str) -> Vec<(&'static str, String)> {
        vec![
            ("id", member.id.to_string()),
            ("nomor_keanggotaan", member.nomor_keanggotaan.clone()),
            ("nama", member.nama.clone()),
            ("divisi", member.divisi.clone()),
            ("pinjaman", "5000000".to_string()),
            ("cicilan", "12".to_string()),
            ("cicilan_perbulan", "416667".to_string()),
            ("tanggal", tanggal.to_string()),
        ]
    }

    pub fn location(response: &axum_test::TestResponse) -> String {
        response
            .header("location")
            .to_str()
            .expect("Location header is not ASCII")
            .to_string()
    }

    pub fn period(year: i32, month: u32) -> LoanPeriod {
        LoanPeriod::new(year, month).expect("Invalid test period")
    }
}
