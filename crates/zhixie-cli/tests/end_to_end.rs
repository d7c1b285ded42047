//! End-to-end runs of the import and backfill jobs against a scratch
//! database, with every remote source served from memory.
//!
//! Also pins the JSON field names of the reports printed by `--json`.

use tempfile::TempDir;

use zhixie_backfill::BackfillPipeline;
use zhixie_core::{BackfillConfig, CrawlConfig, DictionarySyncConfig, SeedConfig};
use zhixie_fetch::{StaticFetcher, StaticTranslator};
use zhixie_ingest::{run_crawl, run_seed, sync_dictionary, ImportTotals};
use zhixie_lexicon::catalog::GRADED_LEVELS;
use zhixie_store::LexiconStore;

const FREQUENCY_URL: &str = "https://example.test/frequency.txt";
const DICTIONARY_URL: &str = "https://example.test/ecdict.csv";

const DICTIONARY_CSV: &str = "word,phonetic,definition,translation,pos\n\
    the,ðə,art. definite article,这，那,art\n\
    word,wɜːd,n. unit of language,单词,n\n\
    house,haʊs,n. building,房子,n\n\
    big,bɪɡ,adj. large,大的,adj\n\
    abandon,ə'bændən,v. leave,放弃,v\n";

const JUNIOR_JSON: &str = r#"[
    {"word": "abandon", "translations": [{"translation": "放弃", "type": "v"}]},
    {"word": "bigger", "translations": []}
]"#;

fn open_store(dir: &TempDir) -> LexiconStore {
    LexiconStore::open(dir.path().join("data").join("zhixie.db")).unwrap()
}

fn fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with(FREQUENCY_URL, "the\nwords\nhouses\nqwxz\n")
        .with(DICTIONARY_URL, DICTIONARY_CSV)
        .with(GRADED_LEVELS[0].url, JUNIOR_JSON)
}

#[test]
fn test_import_then_backfill() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let fetcher = fetcher();

    let seed = run_seed(
        &store,
        &fetcher,
        &SeedConfig {
            include_remote: false,
            ..Default::default()
        },
    )
    .unwrap();
    assert!(seed.total_words() > 0);

    let crawl = run_crawl(
        &store,
        &fetcher,
        &CrawlConfig {
            frequency_list_url: FREQUENCY_URL.into(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(crawl.sources[0].words_imported, 4);

    let sync = sync_dictionary(
        &store,
        &fetcher,
        &DictionarySyncConfig {
            url: DICTIONARY_URL.into(),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(sync.rows_imported, 5);

    let missing_before = store.count_missing_translations().unwrap();
    // the, words, houses, qwxz, bigger
    assert_eq!(missing_before, 5);

    let translator = StaticTranslator::new().with("qwxz", "qwxz");
    let config = BackfillConfig {
        upgrade_format: true,
        use_inflection: true,
        use_translator: true,
        translator_delay_ms: 0,
        ..Default::default()
    };
    let report = BackfillPipeline::run(&store, &config, &translator).unwrap();

    assert_eq!(report.dictionary_filled, 1);
    // abandon was imported as the bare dictionary translation
    assert_eq!(report.format_upgraded, Some(1));
    assert_eq!(report.inflection_filled, Some(3));
    assert_eq!(report.translator_filled, Some(0));
    assert_eq!(report.remaining_empty, 1);

    let translation = |text: &str| store.get_word(text).unwrap().unwrap().translation;
    assert_eq!(translation("the").as_deref(), Some("art. 这，那"));
    assert_eq!(translation("words").as_deref(), Some("n. 单词"));
    assert_eq!(translation("houses").as_deref(), Some("n. 房子"));
    assert_eq!(translation("bigger").as_deref(), Some("adj. 大的"));
    assert_eq!(translation("abandon").as_deref(), Some("v. 放弃"));
    // seeded translations are never replaced by the dictionary
    assert_eq!(translation("apple").as_deref(), Some("苹果"));

    let again = BackfillPipeline::run(&store, &config, &translator).unwrap();
    assert_eq!(again.total_updated(), 0);
}

#[test]
fn test_report_json_field_names() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let fetcher = fetcher();

    let crawl = run_crawl(
        &store,
        &fetcher,
        &CrawlConfig {
            frequency_list_url: FREQUENCY_URL.into(),
            ..Default::default()
        },
    )
    .unwrap();
    let json = serde_json::to_value(&crawl).unwrap();
    assert!(json["kindergartenDeleted"].is_number());
    assert!(json["durationMs"].is_number());
    assert_eq!(json["sources"][0]["name"], "lexicon_kindergarten");
    assert!(json["sources"][0]["wordsImported"].is_number());
    assert!(json["sources"][0]["phrasesImported"].is_number());
    assert_eq!(json["sources"][2]["skipped"], true);

    let sync = sync_dictionary(
        &store,
        &fetcher,
        &DictionarySyncConfig {
            url: DICTIONARY_URL.into(),
            ..Default::default()
        },
    )
    .unwrap();
    let json = serde_json::to_value(&sync).unwrap();
    assert_eq!(json["rowsImported"], 5);
    assert_eq!(json["batches"], 1);

    let report =
        BackfillPipeline::run(&store, &BackfillConfig::default(), &StaticTranslator::new()).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert!(json["dictionaryFilled"].is_number());
    assert!(json["remainingEmpty"].is_number());
    assert!(json.get("inflectionFilled").is_none());
}
