//! fieldlog CLI
//!
//! Emits a single structured record, configured from the environment the
//! same way an application embedding the facade would be.

use clap::Parser;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "fieldlog")]
#[command(about = "fieldlog - emit a structured log record", long_about = None)]
struct Cli {
    #[command(flatten)]
    emit: commands::emit::EmitArgs,
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = commands::emit::execute(cli.emit) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}
