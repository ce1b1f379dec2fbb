// alo-client/tests/customer_search.rs
// Debounced customer type-ahead

mod support;

use alo_client::CustomerSearch;
use shared::models::Customer;
use std::sync::Arc;
use std::time::Duration;
use support::FakeRestaurant;

const DEBOUNCE: Duration = Duration::from_millis(800);

fn service() -> Arc<FakeRestaurant> {
    let service = FakeRestaurant::new();
    *service.customers.lock().unwrap() = vec![
        Customer {
            id: "c-1".into(),
            name: "Linh Tran".into(),
            email: Some("linh@example.com".into()),
            phone_number: None,
        },
        Customer {
            id: "c-2".into(),
            name: "Minh Le".into(),
            email: None,
            phone_number: Some("0901".into()),
        },
    ];
    Arc::new(service)
}

#[tokio::test]
async fn test_search_builds_labelled_options() {
    let service = service();
    let search = CustomerSearch::new(service.clone(), DEBOUNCE);

    let options = search.search("linh").await.unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].label, "Linh Tran - linh@example.com - No phone");
    assert_eq!(options[0].value, "c-1");

    let query = service.customer_calls.lock().unwrap()[0].clone();
    assert_eq!((query.total_rows, query.skip_rows), (50, 0));
}

#[tokio::test(start_paused = true)]
async fn test_only_last_keystroke_searches() {
    let service = service();
    let search = CustomerSearch::new(service.clone(), DEBOUNCE);
    let mut options = search.subscribe();

    search.input("l");
    tokio::time::sleep(Duration::from_millis(300)).await;
    search.input("li");
    tokio::time::sleep(Duration::from_millis(300)).await;
    let last = search.input("linh");

    last.await.unwrap();
    let calls: Vec<_> = service
        .customer_calls
        .lock()
        .unwrap()
        .iter()
        .map(|q| q.search_text.clone())
        .collect();
    assert_eq!(calls, vec!["linh"]);

    options.changed().await.unwrap();
    assert_eq!(options.borrow().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blank_input_clears_options() {
    let service = service();
    let search = CustomerSearch::new(service.clone(), DEBOUNCE);

    search.input("minh").await.unwrap();
    assert_eq!(search.options().len(), 1);

    search.input("   ").await.unwrap();
    assert!(search.options().is_empty());
    assert_eq!(service.customer_calls.lock().unwrap().len(), 1);
}
