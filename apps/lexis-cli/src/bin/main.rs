use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use lexis_core::config::{expand_path, Config, Settings};
use lexis_core::fixtures::FixtureStore;
use lexis_filter::FilterBuilder;
use lexis_search::{ConferenceFanOut, SearchAggregator, SearchOutcome, SearchStatus};

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() { eprintln!("Usage: {} <filter|search> [args...]", prog); std::process::exit(1); }
    let cmd = args.remove(0);
    (cmd, args)
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> anyhow::Result<()> {
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    init_tracing(&settings);
    tracing::debug!(?settings, "configuration loaded");
    let (cmd, args) = parse_args();
    match cmd.as_str() {
        "filter" => {
            let message = args.join(" ");
            if message.trim().is_empty() { eprintln!("Usage: lexis filter \"<message>\""); std::process::exit(1); }
            let filter = FilterBuilder::from_settings(&settings.filter).build(&message);
            println!("{}", filter.to_json()?);
        }
        "search" => {
            let query = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: lexis search \"<query>\" [fixtures_dir]"); std::process::exit(1)
            });
            let fixtures_dir = expand_path(args.get(1).cloned().unwrap_or_else(|| settings.data.fixtures_dir.clone()));
            let store = Arc::new(FixtureStore::load(&fixtures_dir)?);
            let aggregator = SearchAggregator::new(store.clone(), ConferenceFanOut::new(store.clone()), store)
                .with_settings(&settings.search);
            let outcome = tokio::runtime::Runtime::new()?.block_on(aggregator.perform_search(&query));
            let state = aggregator.snapshot();
            println!("🔍 Search: \"{}\"", query);
            match (&outcome, &state.status) {
                (SearchOutcome::Failed(e), _) => { eprintln!("❌ Search failed: {}", e); std::process::exit(2); }
                (_, SearchStatus::Idle) => println!("Nothing to search."),
                _ => {
                    let r = &state.results;
                    println!("  actants:     {}", r.actants.len());
                    println!("  seminars:    {}", r.conferences.seminars.len());
                    println!("  colloques:   {}", r.conferences.colloques.len());
                    println!("  study days:  {}", r.conferences.study_days.len());
                    println!("  oeuvres:     {}", r.oeuvres.len());
                    println!("📊 {} results", state.total_results());
                    for a in &r.actants { println!("    👤 {} ({})", a.display_name(), a.id); }
                    for o in &r.oeuvres { println!("    🎨 {} ({})", o.title, o.id); }
                }
            }
        }
        _ => { eprintln!("Unknown command: {}", cmd); std::process::exit(1); }
    }
    Ok(())
}
