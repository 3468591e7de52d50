use clap::Parser;
use std::fs;

pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

/// # Panics
///
/// Will panic if the arguments are invalid
#[must_use]
pub fn args_checks() -> CleanArgs {
    let args = Args::parse();
    CleanArgs::new(args)
}

impl CleanArgs {
    #[must_use]
    pub fn new(args: Args) -> Self {
        let mut combined_sql_script = String::new();
        if let Some(db_startup_script) = &args.db_startup_script {
            let files = db_startup_script.split(';');
            for file in files {
                let file = file.trim();
                if file.is_empty() {
                    continue;
                }

                match fs::read_to_string(file) {
                    Ok(script) => {
                        combined_sql_script.push_str(&script);
                        // push a newline just in case
                        combined_sql_script.push('\n');
                    }
                    Err(e) => {
                        eprintln!("Warning: Failed to read SQL startup script '{file}': {e}");
                        // Continue with other files rather than failing completely
                    }
                }
            }
        }
        CleanArgs {
            db_name: args.db_name,
            bind_addr: args.bind_addr,
            port: args.port,
            db_startup_script: args.db_startup_script,
            combined_sql_script,
            db_populate_json: args.db_populate_json,
        }
    }
}
