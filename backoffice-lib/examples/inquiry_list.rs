//! Inquiry list example.
//!
//! Run with: cargo run --example inquiry_list [status] [search]
//!
//! Requires .env file with:
//! - BACKOFFICE_API_URL
//! - BACKOFFICE_COMPANY_ID

use std::env;

use backoffice_lib::ConsoleClient;
use backoffice_lib::ListView;
use backoffice_lib::api::query::FilterUpdate;
use backoffice_lib::model::Entity;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let mut args = env::args().skip(1);
    let status = args.next();
    let search = args.next();

    let client = ConsoleClient::from_env()?;
    let inquiries = ListView::new(client.collection(Entity::Inquiry));

    if let Some(notice) = inquiries.load().await {
        eprintln!("{}", notice);
        return Ok(());
    }

    if let Some(status) = status {
        inquiries.set_filter(FilterUpdate::Status(status));
    }
    if let Some(search) = search {
        inquiries.set_filter(FilterUpdate::Name(search));
    }

    let view = inquiries.view();
    if view.not_found {
        println!("No inquiries found.");
        return Ok(());
    }

    println!("{} inquiries (page {}):\n", view.total, view.page + 1);
    for row in &view.rows {
        let id = row.id().map(|id| id.to_string()).unwrap_or_default();
        let first = row.get_string("firstName").ok().flatten().unwrap_or("");
        let last = row.get_string("lastName").ok().flatten().unwrap_or("");
        let status = row.get_string("status").ok().flatten().unwrap_or("-");
        println!("  {:<26} {:<24} {}", id, format!("{} {}", first, last), status);
    }

    Ok(())
}
