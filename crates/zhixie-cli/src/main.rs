//! Zhixie: vocabulary database import and translation backfill.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use zhixie_backfill::{BackfillPipeline, BackfillReport};
use zhixie_core::{
    BackfillConfig, CrawlConfig, DictionarySyncConfig, HttpConfig, SeedConfig, StoreConfig,
    TranslatorConfig, ECDICT_CSV_URL, FREQUENCY_LIST_URL,
};
use zhixie_fetch::{HttpFetcher, MyMemoryTranslator, NoopTranslator, Translator};
use zhixie_ingest::{CrawlReport, DictionarySyncReport, ImportTotals, SeedReport, SourceImport};
use zhixie_store::LexiconStore;

#[derive(Parser)]
#[command(name = "zhixie")]
#[command(version, about = "Populate and backfill the Zhixie vocabulary database")]
struct Cli {
    /// SQLite database file (defaults to data/zhixie.db)
    #[arg(long, global = true, env = "ZHIXIE_DB")]
    db: Option<PathBuf>,

    /// Print the run report as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import the built-in levels and the SAT/GRE word lists
    Seed(SeedArgs),
    /// Import the frequency list and the graded vocabulary levels
    Crawl(CrawlArgs),
    /// Stream the ECDICT dictionary into the reference table
    SyncDictionary(SyncDictionaryArgs),
    /// Fill missing word translations
    Backfill(BackfillArgs),
}

#[derive(Args)]
struct SeedArgs {
    /// Skip the remote word lists
    #[arg(long)]
    local_only: bool,
}

#[derive(Args)]
struct CrawlArgs {
    #[arg(long, default_value = FREQUENCY_LIST_URL)]
    frequency_url: String,
    /// Number of frequency-list words to import (0 = all)
    #[arg(long, default_value_t = 10_000)]
    frequency_limit: usize,
    /// Clear the kindergarten level before re-importing it
    #[arg(long)]
    recreate_kindergarten: bool,
}

#[derive(Args)]
struct SyncDictionaryArgs {
    #[arg(long, default_value = ECDICT_CSV_URL)]
    url: String,
    /// Only import the first N rows (0 = all)
    #[arg(long, default_value_t = 0)]
    limit: usize,
    #[arg(long, default_value_t = 1000)]
    batch_size: usize,
}

#[derive(Args)]
struct BackfillArgs {
    /// Max rows to backfill per pass
    #[arg(long, default_value_t = 50_000)]
    limit: usize,
    /// Prefix bare dictionary translations with their part of speech
    #[arg(long)]
    upgrade_format: bool,
    #[arg(long, default_value_t = 50_000)]
    upgrade_limit: usize,
    /// Match remaining words through guessed base forms
    #[arg(long)]
    use_inflection: bool,
    #[arg(long, default_value_t = 500)]
    inflection_batch_size: usize,
    /// Fall back to the MyMemory translation API
    #[arg(long)]
    use_translator: bool,
    /// Delay between translation requests
    #[arg(long, default_value_t = 200)]
    translator_delay_ms: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("ERROR: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let store_config = StoreConfig::resolve(cli.db);
    let store = LexiconStore::open(&store_config.db_path)?;
    let http = HttpConfig::default();

    match cli.command {
        Command::Seed(args) => {
            let fetcher = HttpFetcher::new()?;
            let config = SeedConfig {
                include_remote: !args.local_only,
                http,
            };
            let report = zhixie_ingest::run_seed(&store, &fetcher, &config)?;
            emit(cli.json, &report, print_seed)?;
        }
        Command::Crawl(args) => {
            let fetcher = HttpFetcher::new()?;
            let config = CrawlConfig {
                frequency_list_url: args.frequency_url,
                frequency_limit: args.frequency_limit,
                recreate_kindergarten: args.recreate_kindergarten,
                http,
            };
            let report = zhixie_ingest::run_crawl(&store, &fetcher, &config)?;
            emit(cli.json, &report, print_crawl)?;
        }
        Command::SyncDictionary(args) => {
            let fetcher = HttpFetcher::new()?;
            let config = DictionarySyncConfig {
                url: args.url,
                limit: args.limit,
                batch_size: args.batch_size,
                http,
            };
            let report = zhixie_ingest::sync_dictionary(&store, &fetcher, &config)?;
            emit(cli.json, &report, print_dictionary_sync)?;
        }
        Command::Backfill(args) => {
            let config = BackfillConfig {
                limit: args.limit,
                upgrade_format: args.upgrade_format,
                upgrade_limit: args.upgrade_limit,
                use_inflection: args.use_inflection,
                inflection_batch_size: args.inflection_batch_size,
                use_translator: args.use_translator,
                translator_delay_ms: args.translator_delay_ms,
                ..Default::default()
            };
            let translator: Box<dyn Translator> = if config.use_translator {
                let fetcher = HttpFetcher::new()?;
                Box::new(MyMemoryTranslator::new(
                    fetcher.client().clone(),
                    TranslatorConfig::default(),
                    http.translator_timeout(),
                ))
            } else {
                Box::new(NoopTranslator)
            };
            let report = BackfillPipeline::run(&store, &config, translator.as_ref())?;
            emit(cli.json, &report, print_backfill)?;
        }
    }

    let stats = store.get_stats()?;
    info!(
        "Done ({}): {} sources, {} words, {} phrases, {} dictionary entries, {} missing translations",
        store.db_path().display(),
        stats.sources,
        stats.words,
        stats.phrases,
        stats.dictionary_entries,
        stats.missing_translations
    );
    Ok(())
}

fn emit<T: serde::Serialize>(json: bool, report: &T, print: fn(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print(report);
    }
    Ok(())
}

fn print_sources(sources: &[SourceImport]) {
    for source in sources {
        if source.skipped {
            println!("  {:<20} skipped (fetch failed)", source.name);
        } else {
            println!(
                "  {:<20} {} words, {} phrases",
                source.name, source.words_imported, source.phrases_imported
            );
        }
    }
}

fn print_seed(report: &SeedReport) {
    println!("Seed done.");
    print_sources(&report.sources);
    println!("Words added: {}", report.total_words());
}

fn print_crawl(report: &CrawlReport) {
    if report.kindergarten_deleted > 0 {
        println!("Cleared kindergarten words: {}", report.kindergarten_deleted);
    }
    print_sources(&report.sources);
    println!("Crawl/import done.");
}

fn print_dictionary_sync(report: &DictionarySyncReport) {
    if report.skipped {
        println!("Dictionary could not be fetched; nothing imported.");
    }
    println!("Done. Imported rows: {}", report.rows_imported);
}

fn print_backfill(report: &BackfillReport) {
    println!("Backfilled from dictionary: {}", report.dictionary_filled);
    if let Some(n) = report.format_upgraded {
        println!("Upgraded translation format: {}", n);
    }
    if let Some(n) = report.inflection_filled {
        println!("Backfilled via inflection/lemma: {}", n);
    }
    if let Some(n) = report.translator_filled {
        println!("Backfilled via translator: {}", n);
    }
    println!("Remaining empty translations: {}", report.remaining_empty);
}
