use std::sync::Arc;

use basset_client::{EntityClient, LocalClient};
use basset_entities::{Entry, Transaction};
use basset_store::MemoryEntityStore;

#[tokio::test]
async fn publish_then_query_round_trip() {
    let client = LocalClient::default();

    let mut tx = Transaction::new();
    tx.add(Entry::boolean("Debug:/Entities/Boolean", true));
    tx.add(Entry::string("Debug:/Entities/String", "hello"));
    client.publish(tx).await.unwrap();

    assert_eq!(
        client.get_boolean("Debug:/Entities/Boolean").await.unwrap(),
        Some(true)
    );
    assert_eq!(
        client.get_string("Debug:/Entities/String").await.unwrap(),
        Some("hello".to_string())
    );
}

#[tokio::test]
async fn clients_share_one_store() {
    let store = Arc::new(MemoryEntityStore::new());
    let writer = LocalClient::new(store.clone());
    let reader = LocalClient::new(store);

    writer
        .publish_entries(vec![Entry::set("Main:/Tags", "shared")])
        .await
        .unwrap();

    assert_eq!(reader.get_set("Main:/Tags").await.unwrap(), vec!["shared"]);
}

#[tokio::test]
async fn latest_observation_none_when_missing() {
    let client = LocalClient::default();
    assert_eq!(
        client
            .get_latest_observation("Main:/Test/Observation")
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn rejected_publish_surfaces_as_error_and_applies_nothing() {
    let client = LocalClient::default();
    let entries = vec![
        Entry::boolean("Main:/On", true),
        Entry::duration("Main:/Cycle", "not-a-duration"),
    ];

    assert!(client.publish_entries(entries).await.is_err());
    assert_eq!(client.get_boolean("Main:/On").await.unwrap(), None);
}

#[tokio::test]
async fn observation_publish_and_latest() {
    let client = LocalClient::default();
    client
        .publish_entries(vec![
            Entry::observation("Main:/Temp", "20.5", 100),
            Entry::observation("Main:/Temp", "21.0", 200),
        ])
        .await
        .unwrap();

    let latest = client
        .get_latest_observation("Main:/Temp")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest.value_as::<f64>(), Some(21.0));
    assert_eq!(latest.path, "Main:/Temp");
}
