//! schema-dialect CLI - catalog introspection and DDL generation.

use clap::{Parser, Subcommand};
use schema_dialect::{Column, Config, ConnectionConfig, DialectError, DialectRegistry, Engine, Index};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "schema-dialect")]
#[command(about = "Inspect database catalogs and generate DDL across SQL dialects")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Driver name, overriding the configuration (e.g. mssql, postgres, sqlite3)
    #[arg(long)]
    driver: Option<String>,

    /// Connection string, overriding the configuration
    #[arg(long)]
    dsn: Option<String>,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "warn")]
    verbosity: String,

    /// Log every catalog statement (needs --verbosity debug)
    #[arg(long)]
    show_sql: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered driver names and their database types
    Drivers,

    /// Parse the connection string and print what was extracted
    ParseDsn,

    /// List user tables
    Tables,

    /// List the columns of a table
    Columns {
        /// Table name
        table: String,
    },

    /// List the indexes of a table
    Indexes {
        /// Table name
        table: String,
    },

    /// Print CREATE TABLE and CREATE INDEX statements for the live schema
    Ddl {
        /// Only this table
        #[arg(long)]
        table: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run() -> Result<(), DialectError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format)
        .map_err(|e| DialectError::Config(e.to_string()))?;

    let registry = DialectRegistry::with_builtins();

    // Listing drivers needs neither configuration nor connection
    if let Commands::Drivers = cli.command {
        return print_drivers(&registry, cli.output_json);
    }

    let settings = connection_settings(&cli)?;

    match &cli.command {
        Commands::Drivers => unreachable!(), // Handled above
        Commands::ParseDsn => {
            let driver = registry.require_driver(&settings.driver)?;
            let uri = driver.parse(&settings.driver, &settings.data_source)?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&uri)?);
            } else {
                println!("Database type: {}", uri.db_type.display_name());
                println!("Database: {}", uri.db_name);
                if let Some(ref host) = uri.host {
                    println!("Host: {}", host);
                }
                if let Some(port) = uri.port {
                    println!("Port: {}", port);
                }
                if let Some(ref user) = uri.user {
                    println!("User: {}", user);
                }
                if let Some(ref charset) = uri.charset {
                    println!("Charset: {}", charset);
                }
                if let Some(ref schema) = uri.schema {
                    println!("Schema: {}", schema);
                }
            }
        }

        Commands::Tables => {
            let engine = Engine::open(&registry, &settings).await?;
            let tables = engine.dialect().list_tables().await?;
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&tables)?);
            } else {
                for table in &tables {
                    match table.comment.as_deref().filter(|c| !c.is_empty()) {
                        Some(comment) => println!("{}  -- {}", table.name, comment),
                        None => println!("{}", table.name),
                    }
                }
            }
        }

        Commands::Columns { table } => {
            let engine = Engine::open(&registry, &settings).await?;
            let columns = engine.dialect().list_columns(table).await?;
            if cli.output_json {
                let columns: Vec<&Column> = columns.values().collect();
                println!("{}", serde_json::to_string_pretty(&columns)?);
            } else {
                for column in columns.values() {
                    println!("{}", describe_column(column));
                }
            }
        }

        Commands::Indexes { table } => {
            let engine = Engine::open(&registry, &settings).await?;
            let indexes = engine.dialect().list_indexes(table).await?;
            if cli.output_json {
                let indexes: Vec<&Index> = indexes.values().collect();
                println!("{}", serde_json::to_string_pretty(&indexes)?);
            } else {
                for index in indexes.values() {
                    println!(
                        "{}{} ({})",
                        index.name,
                        if index.is_unique() { " UNIQUE" } else { "" },
                        index.columns.join(", ")
                    );
                }
            }
        }

        Commands::Ddl { table } => {
            let engine = Engine::open(&registry, &settings).await?;
            let mut tables = engine.db_metas().await?;
            if let Some(name) = table {
                tables.retain(|t| &t.name == name);
                if tables.is_empty() {
                    return Err(DialectError::Catalog(format!("Table not found: {}", name)));
                }
            }
            let script = engine.render_ddl(&mut tables);
            if cli.output_json {
                println!("{}", serde_json::to_string_pretty(&script)?);
            } else {
                println!("{}", script);
            }
        }
    }

    Ok(())
}

/// Connection settings from the config file, with command-line overrides.
///
/// `--driver` and `--dsn` together stand in for a missing config file.
fn connection_settings(cli: &Cli) -> Result<ConnectionConfig, DialectError> {
    let mut settings = match (&cli.driver, &cli.dsn) {
        (Some(driver), Some(dsn)) if !cli.config.exists() => {
            ConnectionConfig::new(driver.as_str(), dsn.as_str())
        }
        _ => {
            let config = Config::load(&cli.config)?;
            debug!("Loaded configuration from {:?}", cli.config);
            config.connection
        }
    };

    if let Some(ref driver) = cli.driver {
        settings.driver = driver.clone();
    }
    if let Some(ref dsn) = cli.dsn {
        settings.data_source = dsn.clone();
    }
    if cli.show_sql {
        settings.show_sql = true;
    }
    Ok(settings)
}

fn print_drivers(registry: &DialectRegistry, output_json: bool) -> Result<(), DialectError> {
    let drivers: Vec<(&str, String)> = registry
        .driver_names()
        .into_iter()
        .filter_map(|name| {
            registry
                .driver_db_type(name)
                .map(|db_type| (name, db_type.to_string()))
        })
        .collect();

    if output_json {
        let map: serde_json::Map<String, serde_json::Value> = drivers
            .into_iter()
            .map(|(name, db_type)| (name.to_string(), serde_json::Value::String(db_type)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
    } else {
        for (name, db_type) in drivers {
            println!("{:<10} {}", name, db_type);
        }
    }
    Ok(())
}

fn describe_column(column: &Column) -> String {
    let mut line = format!("{} {}", column.name, column.sql_type);
    match (column.length, column.length2) {
        (0, _) => {}
        (l, 0) => line.push_str(&format!("({})", l)),
        (l, l2) => line.push_str(&format!("({},{})", l, l2)),
    }
    line.push_str(if column.nullable { " NULL" } else { " NOT NULL" });
    if column.is_primary_key {
        line.push_str(" PRIMARY KEY");
    }
    if column.is_auto_increment {
        line.push_str(" AUTO_INCREMENT");
    }
    if let Some(default) = column.default_expr() {
        line.push_str(&format!(" DEFAULT {}", default));
    }
    line
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false);

    if format == "json" {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    Ok(())
}
