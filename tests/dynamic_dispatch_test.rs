use pagador_stub::domain::ports::{KeyValueStoreBox, SetMode};
use pagador_stub::infrastructure::in_memory::InMemoryKeyValueStore;

#[tokio::test]
async fn test_store_as_trait_object() {
    let store: KeyValueStoreBox = Box::new(InMemoryKeyValueStore::new());

    // Verify Send + Sync by spawning a task
    let handle = tokio::spawn(async move {
        store
            .set("fake-braspag.order.1", b"{}".to_vec(), SetMode::CreateOnly)
            .await
            .unwrap();
        store.get("fake-braspag.order.1").await.unwrap().unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved, b"{}".to_vec());
}
