//! shopfloor binary — lists employee names from the manufacturing database
//! and reports how long the query took.
//!
//! Startup order: resolve the config path, load configuration, initialize
//! tracing, open the connection pool, run migrations, produce the report.
//! Any failure is fatal: it is logged and the process exits with code 1.

mod config;
mod report;

use std::io::Write;

use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("SHOPFLOOR_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = match config::load_config(selected_config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    if let Err(e) = run(&config) {
        tracing::error!(error = %e, "shopfloor run failed");
        std::process::exit(1);
    }
}

/// Opens the database and produces the employee name report on stdout.
fn run(config: &config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let pool = shopfloor_db::create_pool(
        &config.database.path,
        shopfloor_db::DbRuntimeSettings {
            busy_timeout_ms: config.database.busy_timeout_ms,
            pool_max_size: config.database.pool_max_size,
        },
    )?;

    {
        let conn = pool.get()?;
        let applied = shopfloor_db::run_migrations(&conn)?;
        if applied > 0 {
            tracing::info!(count = applied, "applied database migrations");
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::print_employee_names(&pool, &mut out)?;
    out.flush()?;

    Ok(())
}
