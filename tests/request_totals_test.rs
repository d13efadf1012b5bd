use request_totals::domain::ports::Storage;
use request_totals::{
    render, InMemoryCatalog, JsonRequestSource, LocalStorage, MissingItemPolicy, OutputFormat,
    TotalsEngine, TotalsError, TotalsOptions,
};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"id": 1, "name": "item_name_0", "default_unit": "each"},
    {"id": 2, "name": "item_name_1", "default_unit": "each"},
    {"id": 3, "name": "item_name_2", "default_unit": "each"},
    {"id": 4, "name": "Diaper", "deleted_at": "2024-03-01T09:30:00Z"}
]"#;

const REQUESTS: &str = r#"[
    {"id": 1, "request_items": [
        {"item_id": 1, "quantity": 20},
        {"item_id": 2, "quantity": 20},
        {"item_id": 3, "quantity": 20}
    ]},
    {"id": 2, "request_items": [
        {"item_id": 1, "quantity": 10, "request_unit": "bundle"},
        {"item_id": 2, "quantity": 10, "request_unit": "bundle"},
        {"item_id": 3, "quantity": 10, "request_unit": "bundle"}
    ]},
    {"id": 3, "request_items": [
        {"item_id": 1, "quantity": "50", "request_unit": "bundle"},
        {"item_id": 2, "quantity": "50", "request_unit": "bundle"},
        {"item_id": 3, "quantity": "50", "request_unit": "bundle"}
    ]}
]"#;

async fn setup(requests: &str) -> (TempDir, LocalStorage, InMemoryCatalog) {
    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap());
    storage.write_file("items.json", CATALOG.as_bytes()).await.unwrap();
    storage
        .write_file("requests.json", requests.as_bytes())
        .await
        .unwrap();
    let catalog = InMemoryCatalog::load(&storage, "items.json").await.unwrap();
    (temp_dir, storage, catalog)
}

fn options(alternate_units_enabled: bool) -> TotalsOptions {
    TotalsOptions {
        alternate_units_enabled,
        ..TotalsOptions::default()
    }
}

#[tokio::test]
async fn test_packs_disabled_merges_units() {
    let (_temp_dir, storage, catalog) = setup(REQUESTS).await;
    let source = JsonRequestSource::new(storage, "requests.json");

    let summary = TotalsEngine::new(source, catalog, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(
        summary.keys().collect::<Vec<_>>(),
        vec!["item_name_0", "item_name_1", "item_name_2"]
    );
    assert_eq!(summary.first(), Some(("item_name_0", 80)));
    assert!(summary.iter().all(|(_, total)| total == 80));
}

#[tokio::test]
async fn test_packs_enabled_splits_units() {
    let (_temp_dir, storage, catalog) = setup(REQUESTS).await;
    let source = JsonRequestSource::new(storage, "requests.json");

    let summary = TotalsEngine::new(source, catalog, options(true))
        .run()
        .await
        .unwrap();

    assert_eq!(
        summary.into_iter().collect::<Vec<_>>(),
        vec![
            ("item_name_0".to_string(), 20),
            ("item_name_1".to_string(), 20),
            ("item_name_2".to_string(), 20),
            ("item_name_0 - bundles".to_string(), 60),
            ("item_name_1 - bundles".to_string(), 60),
            ("item_name_2 - bundles".to_string(), 60),
        ]
    );
}

#[tokio::test]
async fn test_requests_without_items_are_blank() {
    for requests in [r#"[{"id": 1, "request_items": {}}]"#, "[]"] {
        let (_temp_dir, storage, catalog) = setup(requests).await;
        let source = JsonRequestSource::new(storage, "requests.json");

        let summary = TotalsEngine::new(source, catalog, options(true))
            .run()
            .await
            .unwrap();

        assert!(summary.is_empty(), "{}", requests);
    }
}

#[tokio::test]
async fn test_deleted_item_keeps_its_name() {
    let requests = r#"[{"id": 9, "request_items": [
        {"item_id": 4, "quantity": 10, "request_unit": "pack"}
    ]}]"#;
    let (_temp_dir, storage, catalog) = setup(requests).await;
    let source = JsonRequestSource::new(storage, "requests.json");

    let summary = TotalsEngine::new(source, catalog, options(false))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.iter().collect::<Vec<_>>(), vec![("Diaper", 10)]);
    assert_eq!(
        render(&summary, OutputFormat::Json).unwrap(),
        "{\n  \"Diaper\": 10\n}"
    );
}

#[tokio::test]
async fn test_unknown_item_policies() {
    let requests = r#"[{"id": 5, "request_items": [
        {"item_id": 77, "quantity": 3},
        {"item_id": 1, "quantity": 4}
    ]}]"#;

    let (_temp_dir, storage, catalog) = setup(requests).await;
    let skipping = TotalsEngine::new(
        JsonRequestSource::new(storage.clone(), "requests.json"),
        catalog.clone(),
        TotalsOptions::default(),
    );
    let summary = skipping.run().await.unwrap();
    assert_eq!(summary.iter().collect::<Vec<_>>(), vec![("item_name_0", 4)]);

    let strict = TotalsEngine::new(
        JsonRequestSource::new(storage, "requests.json"),
        catalog,
        TotalsOptions {
            on_missing_item: MissingItemPolicy::Fail,
            ..TotalsOptions::default()
        },
    );
    let result = strict.run().await;
    assert!(matches!(
        result,
        Err(TotalsError::ItemNotFound {
            request_id: 5,
            item_id: 77
        })
    ));
}

#[tokio::test]
async fn test_csv_report_written_to_storage() {
    let (temp_dir, storage, catalog) = setup(REQUESTS).await;
    let source = JsonRequestSource::new(storage.clone(), "requests.json");
    let summary = TotalsEngine::new(source, catalog, options(true))
        .run()
        .await
        .unwrap();

    let rendered = render(&summary, OutputFormat::Csv).unwrap();
    storage
        .write_file("out/totals.csv", rendered.as_bytes())
        .await
        .unwrap();

    let written = std::fs::read_to_string(temp_dir.path().join("out/totals.csv")).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines[0], "item,quantity");
    assert_eq!(lines[1], "item_name_0,20");
    assert_eq!(lines[4], "item_name_0 - bundles,60");
    assert_eq!(lines.len(), 7);
}
