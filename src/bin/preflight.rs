use happiness_ranking::infra::config::{self, StoreBackend};
use happiness_ranking::infra::logging;
use happiness_ranking::presentation::format_display;
use happiness_ranking::storage::{self, PostgresStore, RecordStore};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--populate]\n\
         \n\
         Reads env vars:\n\
           DATA_PATH (default dane/dane_szczescie.csv), STORE_BACKEND (memory|postgres)\n\
         For the postgres backend also:\n\
           DATABASE_URL, DB_TABLE (optional), DB_MAX_CONNECTIONS (optional)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let populate = args.iter().any(|a| a == "--populate");

    let data_path = config::data_path();
    let backend = config::store_backend()?;

    println!("> Preflight:");
    println!("  DATA_PATH={}", data_path.display());
    println!("  STORE_BACKEND={:?}", backend);

    // Data file must load regardless of backend.
    let report = storage::load_from_path(&data_path)?;
    println!(
        "  Data file OK: {} valid rows, {} skipped",
        report.records.len(),
        report.skipped()
    );
    for row in &report.rejected {
        let fields: Vec<String> = row.fields.iter().map(|f| format_display(f)).collect();
        println!("    line {}: [{}] {}", row.line, fields.join("; "), row.reason);
    }
    if report.records.is_empty() {
        eprintln!("  Warning: data file has no valid rows; every ranking will be empty.");
    }

    if backend == StoreBackend::Postgres {
        let url = config::database_url()?;
        let mut store =
            PostgresStore::connect(&url, config::db_max_connections(), data_path.clone()).await?;
        if let Some(table) = config::db_table() {
            store = store
                .with_table(&table)
                .ok_or_else(|| anyhow::anyhow!("DB_TABLE '{}' is not a valid identifier", table))?;
        }

        sqlx::query("SELECT 1").execute(store.pool()).await?;
        println!("  Postgres reachable (table '{}').", store.table());

        if populate {
            let inserted = store.populate_if_empty().await?;
            if inserted == 0 {
                println!("  Table already populated; nothing inserted.");
            } else {
                println!("  Inserted {} rows.", inserted);
            }
            println!("  Table holds {} records.", store.count().await?);
        }
    } else if populate {
        eprintln!("  Note: --populate only applies to the postgres backend.");
    }

    println!("> Preflight OK.");
    Ok(())
}
