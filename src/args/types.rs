use clap::Parser;
use serde_json::Value;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path of the SQLite database file. Created on first run.
    #[arg(short = 'n', long, value_name = "DATABASE_NAME")]
    pub db_name: String,
    /// Address the scorecard UI listens on.
    #[arg(long, value_name = "BIND_ADDR", default_value = "127.0.0.1")]
    pub bind_addr: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value = "8087")]
    pub port: u16,
    /// If specified, this sql is run on program startup, after the built-in
    /// schema. Semicolon-separate multiple files. Be careful with the SQL you
    /// run here, don't mess up your own database.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = crate::args::validation::check_readable_file)]
    pub db_startup_script: Option<String>,
    /// JSON file of courses and players to seed when they are missing.
    #[arg(
        long,
        value_name = "DATABASE_POPULATE_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub db_populate_json: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub bind_addr: String,
    pub port: u16,
    pub db_startup_script: Option<String>,
    pub db_populate_json: Option<Value>,
    pub combined_sql_script: String,
}
