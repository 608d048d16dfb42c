use chrono::Local;
use clap::Parser;
use daybook::application::{init::init, resolve_day, ConfigService, EntryService, MonthView};
use daybook::cli::{format_entry, format_entry_list, format_month, Cli, Commands};
use daybook::domain::MonthReference;
use daybook::error::DaybookError;
use daybook::infrastructure::FileSystemRepository;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("daybook={}", log_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DaybookError> {
    match cli.command {
        Commands::Init { path } => {
            init(&path)?;
            println!("Initialized daybook diary at {}", path.display());
            Ok(())
        }
        Commands::Add { day, image, note } => {
            let repo = FileSystemRepository::discover()?;
            let mut service = EntryService::open(&repo)?;
            let entry = service.add(resolve_day(&day)?, &image, &note)?;
            println!("Saved entry for {}", entry.day);
            Ok(())
        }
        Commands::Show { day, output } => {
            let repo = FileSystemRepository::discover()?;
            let service = EntryService::open(&repo)?;
            let entry = service.show(resolve_day(&day)?)?;
            print!("{}", format_entry(entry));

            if let Some(path) = output {
                if service.export(entry, &path)? {
                    println!("Photo written to {}", path.display());
                } else {
                    println!("Photo is missing from storage");
                }
            }
            Ok(())
        }
        Commands::Remove { day } => {
            let repo = FileSystemRepository::discover()?;
            let mut service = EntryService::open(&repo)?;
            match service.remove(resolve_day(&day)?)? {
                Some(entry) => println!("Removed entry for {}", entry.day),
                None => println!("Nothing stored for that day"),
            }
            Ok(())
        }
        Commands::Month { month } => {
            let repo = FileSystemRepository::discover()?;
            let service = EntryService::open(&repo)?;
            let first = MonthReference::parse(&month)?.resolve(Local::now().date_naive());
            let view = MonthView::build(service.store(), first);
            print!("{}", format_month(&view));
            Ok(())
        }
        Commands::List { month } => {
            let repo = FileSystemRepository::discover()?;
            let service = EntryService::open(&repo)?;
            let entries = service.list(month.as_deref())?;
            println!("{}", format_entry_list(&entries).trim_end());
            Ok(())
        }
        Commands::Config { key, value, list } => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("persist_attempts = {}", config.persist_attempts);
                println!("persist_backoff_ms = {}", config.persist_backoff_ms);
                println!("created = {}", config.created.to_rfc3339());
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
            } else {
                println!("Usage: daybook config [--list | <key> [<value>]]");
                println!("Valid keys: persist_attempts, persist_backoff_ms, created");
            }
            Ok(())
        }
    }
}
