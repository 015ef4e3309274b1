//! End-to-end fog scenarios against the in-memory store.

use bson::{doc, Bson};
use fog_core::{flattened_keys, CompiledGeneratorMap, GeneratorRef};
use fog_transform::compile_generators;
use mongo_fog::{
    load_config, run_fog, sample_value, FogConfig, FogError, FogOptions, GeneratorRegistry,
    MemoryStore, Namespace,
};
use rand::rngs::StdRng;
use std::io::Write;
use std::sync::Arc;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("mongo_fog=debug,fog_transform=debug")
        .try_init()
        .ok();
}

fn seeded() -> FogOptions {
    FogOptions {
        seed: Some(42),
        ..Default::default()
    }
}

fn users() -> Namespace {
    Namespace::new("mydb", "users")
}

#[tokio::test]
async fn test_only_existing_fields_are_set() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let store = MemoryStore::new();
    store.insert_many(
        &users(),
        [
            doc! { "_id": 1, "email": "a@x.com", "name": "Bob" },
            doc! { "_id": 2, "name": "Ann" },
        ],
    );
    let config = FogConfig::from_yaml(r#"{"transform": {"mydb": {"users": {"email": "safe_email"}}}}"#)?;

    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    let first = store.updates_for(&users(), &Bson::Int32(1));
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].payload.set.keys().collect::<Vec<_>>(), vec!["email"]);
    assert!(first[0].payload.unset.is_empty());

    let second = store.updates_for(&users(), &Bson::Int32(2));
    assert_eq!(second.len(), 1);
    assert!(second[0].payload.set.is_empty());
    assert!(second[0].succeeded);

    let bob = store.document(&users(), &Bson::Int32(1)).unwrap();
    assert_eq!(bob.get_str("name")?, "Bob");
    assert_ne!(bob.get_str("email")?, "a@x.com");
    assert_eq!(
        store.document(&users(), &Bson::Int32(2)).unwrap(),
        doc! { "_id": 2, "name": "Ann" }
    );
    Ok(())
}

#[tokio::test]
async fn test_set_keys_are_subset_of_document_keys() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let originals = vec![
        doc! { "_id": 1, "email": "a@x.com", "address": { "city": "Oslo", "zip": "0150" } },
        doc! { "_id": 2, "address": { "zip": "5003" } },
        doc! { "_id": 3, "address": {} },
        doc! { "_id": 4, "address": "unstructured" },
    ];
    store.insert_many(&users(), originals.clone());
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      email: safe_email\n      address:\n        city: city\n        zip: postcode\n",
    )?;

    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    for original in &originals {
        let id = original.get("_id").unwrap();
        let keys = flattened_keys(original);
        for update in store.updates_for(&users(), id) {
            assert!(update.payload.set.keys().all(|key| keys.contains(key)));
        }
        let after = store.document(&users(), id).unwrap();
        assert_eq!(flattened_keys(&after), keys, "fields added or removed on {id}");
    }
    Ok(())
}

#[tokio::test]
async fn test_delete_fields_are_unset() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    store.insert_many(
        &users(),
        [doc! { "_id": 1, "address": { "city": "Oslo", "zip": "0150" }, "ssn": "123-45-6789" }],
    );
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      ssn: delete\n      address:\n        city: city\n        zip: delete\n",
    )?;

    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    let after = store.document(&users(), &Bson::Int32(1)).unwrap();
    assert!(!after.contains_key("ssn"));
    let address = after.get_document("address")?;
    assert!(!address.contains_key("zip"));
    assert!(address.contains_key("city"));
    Ok(())
}

#[tokio::test]
async fn test_vacate_collection() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let sessions = Namespace::new("mydb", "sessions");
    store.insert_many(&users(), [doc! { "_id": 1, "email": "a@x.com" }]);
    store.insert_many(&sessions, (0..3).map(|i| doc! { "_id": i, "token": "secret" }));
    let config = FogConfig::from_yaml("transform:\n  mydb:\n    users: delete\n    sessions: delete\n")?;

    let summary =
        run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    assert!(store.is_empty(&users()));
    assert!(store.is_empty(&sessions));
    assert_eq!(summary.documents_deleted(), 4);
    Ok(())
}

#[tokio::test]
async fn test_vacate_ignores_filters() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    store.insert_many(
        &users(),
        [doc! { "_id": 1, "active": true }, doc! { "_id": 2, "active": false }],
    );
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users: delete\nfilters:\n  mydb:\n    users: { active: true }\n",
    )?;

    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    assert!(store.is_empty(&users()));
    Ok(())
}

#[tokio::test]
async fn test_colliding_generator_aborts_after_ten_attempts() {
    init_tracing();
    let store = MemoryStore::new();
    store.create_unique_index(&users(), "email");
    store.insert_many(
        &users(),
        [
            doc! { "_id": 1, "email": "a@x.com" },
            doc! { "_id": 2, "email": "b@x.com" },
            doc! { "_id": 3, "email": "c@x.com" },
        ],
    );
    let mut registry = GeneratorRegistry::with_builtins();
    registry.register("fixed_email", |_: &mut StdRng| {
        Bson::String("fixed@example.com".to_string())
    });
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      email: fixed_email\n  later:\n    things: delete\n",
    )
    .unwrap();
    let later = Namespace::new("later", "things");
    store.insert_many(&later, [doc! { "_id": 1 }]);

    let err = run_fog(&store, Arc::new(registry), &config, seeded())
        .await
        .unwrap_err();

    match err {
        FogError::RetriesExhausted { attempts, id, .. } => {
            assert_eq!(attempts, 10);
            assert_eq!(id, "2");
        }
        other => panic!("Expected RetriesExhausted, got {other:?}"),
    }
    assert_eq!(store.updates_for(&users(), &Bson::Int32(1)).len(), 1);
    assert_eq!(store.updates_for(&users(), &Bson::Int32(2)).len(), 10);
    // The run stops: no later document or collection is touched
    assert!(store.updates_for(&users(), &Bson::Int32(3)).is_empty());
    assert_eq!(store.len(&later), 1);
}

#[tokio::test]
async fn test_filter_scopes_transform() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    store.insert_many(
        &users(),
        [
            doc! { "_id": 1, "email": "a@x.com", "active": true },
            doc! { "_id": 2, "email": "b@x.com", "active": false },
        ],
    );
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      email: safe_email\nfilters:\n  mydb:\n    users: { active: true }\n",
    )?;

    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, seeded()).await?;

    assert_ne!(
        store.document(&users(), &Bson::Int32(1)).unwrap().get_str("email")?,
        "a@x.com"
    );
    assert_eq!(
        store.document(&users(), &Bson::Int32(2)).unwrap().get_str("email")?,
        "b@x.com"
    );
    Ok(())
}

#[tokio::test]
async fn test_dry_run_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let store = MemoryStore::new();
    let sessions = Namespace::new("mydb", "sessions");
    store.insert_many(&users(), [doc! { "_id": 1, "email": "a@x.com" }]);
    store.insert_many(&sessions, [doc! { "_id": 1 }]);
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      email: safe_email\n    sessions: delete\n",
    )?;

    let options = FogOptions {
        dry_run: true,
        ..seeded()
    };
    run_fog(&store, Arc::new(GeneratorRegistry::with_builtins()), &config, options).await?;

    assert!(store.updates().is_empty());
    assert_eq!(store.len(&sessions), 1);
    assert_eq!(store.documents(&users())[0].get_str("email")?, "a@x.com");
    Ok(())
}

#[test]
fn test_nested_spec_compiles_to_dotted_paths() {
    let config = FogConfig::from_yaml(
        "transform:\n  mydb:\n    users:\n      address:\n        city: city\n        zip: delete\n",
    )
    .unwrap();
    let fields = match &config.transform.databases[0].collections[0].spec {
        fog_core::CollectionSpec::Fields(fields) => fields,
        other => panic!("Expected field mapping, got {other:?}"),
    };

    let compiled = compile_generators(fields, &GeneratorRegistry::with_builtins()).unwrap();

    let expected: CompiledGeneratorMap = [
        ("address.city".to_string(), GeneratorRef::Call("city".to_string())),
        ("address.zip".to_string(), GeneratorRef::Delete),
    ]
    .into_iter()
    .collect();
    assert_eq!(compiled, expected);
}

#[test]
fn test_load_config_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "transform:\n  mydb:\n    users:\n      email: safe_email")?;

    let config = load_config(file.path())?;
    assert_eq!(config.transform.collection_count(), 1);

    let missing = load_config(std::path::Path::new("/nonexistent/fog.yaml"));
    assert!(missing.is_err());
    Ok(())
}

#[test]
fn test_sample_value() {
    let registry = GeneratorRegistry::with_builtins();
    let url = sample_value(&registry, "safe_image_url", Some(1)).unwrap();
    assert!(url.as_str().unwrap().starts_with("https://"));
    assert!(sample_value(&registry, "nope", None).is_err());
}
