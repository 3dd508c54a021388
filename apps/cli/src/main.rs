//! # Vyapar Flow CLI Entry Point
//!
//! ```bash
//! vyapar customer add "Ramesh" --mobile 9876543210
//! vyapar customer txn <id> udhaar 500 --note "cement"
//! vyapar order add "Gate welding" 1000 --advance 300 --customer <id>
//! vyapar dashboard --json
//! vyapar backup export --dir ~/backups
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad input, unknown id, rejected backup, storage failure)

use std::process;

use vyapar_cli::args;
use vyapar_cli::error::CliError;

#[tokio::main]
async fn main() {
    vyapar_cli::init_tracing();

    let args = args::parse_args();
    let json = args.json;

    if let Err(e) = vyapar_cli::run(args).await {
        match e.downcast_ref::<CliError>() {
            Some(cli) if json => match serde_json::to_string(cli) {
                Ok(body) => println!("{}", body),
                Err(_) => eprintln!("Error: {}", cli),
            },
            _ => eprintln!("Error: {:#}", e),
        }
        process::exit(1);
    }
}
