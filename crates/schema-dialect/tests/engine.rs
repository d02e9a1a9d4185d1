//! Engine behavior against a scripted connection.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use schema_dialect::{
    Connection, ConnectionConfig, DialectError, DialectRegistry, Engine, Index, IndexType, Result,
    Row, SqlType, SqlValue, Statement,
};

/// Replays canned result sets in order and records what was asked.
#[derive(Default)]
struct ScriptedConnection {
    responses: Mutex<VecDeque<Vec<Row>>>,
    executed: Mutex<Vec<Statement>>,
    closed: bool,
}

impl ScriptedConnection {
    fn respond(self, rows: Vec<Vec<SqlValue>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(rows.into_iter().map(Row::new).collect());
        self
    }

    fn executed(&self) -> Vec<Statement> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Connection for ScriptedConnection {
    async fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>> {
        self.executed
            .lock()
            .unwrap()
            .push(Statement::new(sql, args.to_vec()));
        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_default())
    }

    fn is_valid(&self) -> bool {
        !self.closed
    }
}

fn text(v: &str) -> SqlValue {
    SqlValue::Text(v.to_string())
}

const USERS_SQL: &str = "CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
                         email TEXT NOT NULL, name TEXT)";
const USERS_EMAIL_INDEX: &str = "CREATE UNIQUE INDEX `UQE_users_email` ON `users` (`email`)";

/// A sqlite catalog with one table, one unique index and one automatic index.
fn users_catalog() -> ScriptedConnection {
    ScriptedConnection::default()
        .respond(vec![vec![text("users")]])
        .respond(vec![vec![text(USERS_SQL)]])
        .respond(vec![
            vec![text("UQE_users_email"), text(USERS_EMAIL_INDEX)],
            vec![text("sqlite_autoindex_users_1"), SqlValue::Null],
        ])
}

fn sqlite_engine(connection: Arc<ScriptedConnection>) -> Engine {
    let registry = DialectRegistry::with_builtins();
    let settings = ConnectionConfig::new("sqlite3", "file:app.db");
    Engine::with_connection(&registry, &settings, connection).unwrap()
}

#[tokio::test]
async fn test_with_connection_binds_dialect() {
    let engine = sqlite_engine(Arc::new(ScriptedConnection::default()));
    assert_eq!(engine.uri().db_name, "app.db");
    assert_eq!(engine.dialect().quote("order"), "`order`");
    assert_eq!(engine.dialect().uri().map(|u| u.db_name.as_str()), Some("app.db"));
}

#[tokio::test]
async fn test_with_connection_applies_params() {
    let registry = DialectRegistry::with_builtins();
    let mut settings = ConnectionConfig::new("postgres", "postgres://app@localhost/shop");
    settings.params.insert("schema".into(), "sales".into());
    settings.show_sql = true;

    let engine =
        Engine::with_connection(&registry, &settings, Arc::new(ScriptedConnection::default()))
            .unwrap();
    let base = engine.dialect().base();
    assert_eq!(base.param("schema"), Some("sales"));
    assert!(base.show_sql());
    assert_eq!(base.driver_name(), "postgres");
}

#[tokio::test]
async fn test_with_connection_rejects_closed_handle() {
    let registry = DialectRegistry::with_builtins();
    let settings = ConnectionConfig::new("sqlite3", "file:app.db");
    let closed = Arc::new(ScriptedConnection {
        closed: true,
        ..Default::default()
    });
    let err = Engine::with_connection(&registry, &settings, closed).err().unwrap();
    assert!(matches!(err, DialectError::InvalidConnection(_)));
}

#[tokio::test]
async fn test_unknown_driver() {
    let registry = DialectRegistry::with_builtins();
    let settings = ConnectionConfig::new("db2", "db2://host/db");
    let err = Engine::with_connection(&registry, &settings, Arc::new(ScriptedConnection::default()))
        .err()
        .unwrap();
    assert!(matches!(err, DialectError::UnsupportedDriver(name) if name == "db2"));
}

#[tokio::test]
async fn test_missing_database_name() {
    let registry = DialectRegistry::with_builtins();
    let settings = ConnectionConfig::new("mysql", "root:secret@tcp(localhost:3306)/");
    let err = Engine::with_connection(&registry, &settings, Arc::new(ScriptedConnection::default()))
        .err()
        .unwrap();
    assert!(matches!(err, DialectError::MissingDatabaseName { .. }));
}

#[tokio::test]
async fn test_open_oracle_needs_caller_connection() {
    let registry = DialectRegistry::with_builtins();
    let settings = ConnectionConfig::new("oci8", "oracle://scott:tiger@db:1521/ORCL");
    let err = Engine::open(&registry, &settings).await.err().unwrap();
    assert!(matches!(err, DialectError::UnsupportedDriver(_)));
}

#[tokio::test]
async fn test_existence_checks() {
    let conn = Arc::new(
        ScriptedConnection::default()
            .respond(vec![vec![text("users")]])
            .respond(Vec::new())
            .respond(vec![vec![text("email")]]),
    );
    let engine = sqlite_engine(conn.clone());

    assert!(engine.is_table_exist("users").await.unwrap());

    let mut index = Index::new("email", IndexType::Unique);
    index.add_column("email");
    assert!(!engine.is_index_exist("users", &index).await.unwrap());

    assert!(engine.is_column_exist("users", "email").await.unwrap());

    let executed = conn.executed();
    assert_eq!(executed[0].args, vec![text("users")]);
    assert_eq!(executed[1].args, vec![text("UQE_users_email")]);
    assert_eq!(executed[2].args, vec![text("users"), text("email")]);
}

#[tokio::test]
async fn test_db_metas() {
    let engine = sqlite_engine(Arc::new(users_catalog()));
    let tables = engine.db_metas().await.unwrap();
    assert_eq!(tables.len(), 1);

    let users = &tables[0];
    assert_eq!(users.name, "users");
    assert_eq!(users.column_names().collect::<Vec<_>>(), vec!["id", "email", "name"]);
    assert_eq!(users.primary_keys(), ["id".to_string()]);

    let id = users.column("id").unwrap();
    assert_eq!(id.sql_type, SqlType::Integer);
    assert!(id.is_auto_increment);

    // Automatic indexes have no SQL and are skipped.
    assert_eq!(users.indexes.len(), 1);
    let email_index = &users.indexes["email"];
    assert!(email_index.is_unique());
    assert!(email_index.is_regular);
    assert_eq!(email_index.columns, vec!["email"]);

    let email = users.column("email").unwrap();
    assert_eq!(email.indexes.get("email"), Some(&0));
    assert!(users.column("name").unwrap().indexes.is_empty());
}

#[tokio::test]
async fn test_db_metas_index_on_unknown_column() {
    let conn = ScriptedConnection::default()
        .respond(vec![vec![text("users")]])
        .respond(vec![vec![text(USERS_SQL)]])
        .respond(vec![vec![
            text("IDX_users_lower_email"),
            text("CREATE INDEX IDX_users_lower_email ON users (lower(email))"),
        ]]);
    let engine = sqlite_engine(Arc::new(conn));
    let err = engine.db_metas().await.unwrap_err();
    match err {
        DialectError::Catalog(message) => {
            assert!(message.contains("lower_email"));
            assert!(message.contains("on users"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_dump_ddl() {
    let engine = sqlite_engine(Arc::new(users_catalog()));
    let ddl = engine.dump_ddl().await.unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE IF NOT EXISTS `users` (`id` INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL, \
         `email` TEXT NOT NULL, `name` TEXT NULL);\n\
         CREATE UNIQUE INDEX `UQE_users_email` ON `users` (`email`);"
    );
}

#[tokio::test]
async fn test_dump_ddl_empty_schema() {
    let engine = sqlite_engine(Arc::new(ScriptedConnection::default()));
    assert_eq!(engine.dump_ddl().await.unwrap(), "");
}
