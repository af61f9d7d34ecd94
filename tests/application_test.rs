use roster::app::{parse_order_line, submit_order, Application};
use roster_core::*;
use serde_json::json;

fn kitchen_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.observability.metrics_enabled = false;
    config.staff = vec![
        StaffConfig {
            id: "alice".to_string(),
            speciality: vec!["grill".to_string(), "fryer".to_string()],
            prep_millis: 5,
        },
        StaffConfig {
            id: "bob".to_string(),
            speciality: vec!["grill".to_string()],
            prep_millis: 5,
        },
    ];
    config
}

#[test]
fn test_parse_order_line() {
    let (speciality, body) = parse_order_line("grill double burger").unwrap();
    assert_eq!(speciality, Speciality::from("grill"));
    assert_eq!(body, json!("double burger"));

    let (_, body) = parse_order_line("  salad {\"size\": \"large\"} ").unwrap();
    assert_eq!(body, json!({"size": "large"}));

    assert!(parse_order_line("grill").is_none());
    assert!(parse_order_line("   ").is_none());
}

#[tokio::test]
async fn test_open_kitchen_brings_staff_on_duty() {
    let app = Application::new(kitchen_config());
    let workers = app.open_kitchen().await.unwrap();
    assert_eq!(workers.len(), 2);

    let roster = app.dispatcher().roster();
    let ids: Vec<_> = roster.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["alice", "bob"]);
    assert!(roster[0].can_handle(&Speciality::from("fryer")));
}

#[tokio::test]
async fn test_submit_order_through_simulated_kitchen() {
    let app = Application::new(kitchen_config());
    app.open_kitchen().await.unwrap();

    let result = submit_order(app.dispatcher(), Speciality::from("fryer"), json!("fries"))
        .await
        .unwrap();
    assert_eq!(result, json!("fries ready (alice)"));

    let err = submit_order(app.dispatcher(), Speciality::from("sushi"), json!("roll"))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DispatchError>(),
        Some(DispatchError::NoAvailableWorker { .. })
    ));
}

#[tokio::test]
async fn test_run_spreads_orders_across_staff() {
    let app = Application::new(kitchen_config());
    app.open_kitchen().await.unwrap();

    let input: &[u8] = b"grill burger\ngrill steak\n\nnot-an-order\ngrill hotdog\ngrill ribs\n";
    app.run(input).await.unwrap();

    let dispatcher = app.dispatcher();
    let total: u64 = dispatcher.roster().iter().map(|s| s.load).sum();
    assert_eq!(total, 4);
    assert_eq!(dispatcher.current_load(&StaffId::from("alice")), 2);
    assert_eq!(dispatcher.current_load(&StaffId::from("bob")), 2);
}
