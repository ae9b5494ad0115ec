use pubsim::config::Settings;
use pubsim::{Payload, PubSubError, Simulator};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Order {
    id: u32,
    sku: String,
}

#[test]
fn integration_publish_fan_out_and_pull() {
    let mut settings = Settings::default();
    settings.simulator.max_batch_size = 3;
    let mut sim = Simulator::from_settings(&settings);

    sim.create_topic("orders", None, None);
    sim.create_subscription("orders-sub", "orders", None, None)
        .unwrap();

    let delivered = Arc::new(Mutex::new(Vec::new()));
    let sink = delivered.clone();
    sim.subscribe("orders-sub", move |env| {
        let order: Order = env.decode()?;
        sink.lock().unwrap().push(order.id);
        Ok(())
    })
    .unwrap();

    let orders: Vec<Payload> = (1..=3)
        .map(|id| {
            Payload::json(&Order {
                id,
                sku: format!("sku-{id}"),
            })
            .unwrap()
        })
        .collect();
    let ids = sim.publish_batch("orders", orders).unwrap();
    assert_eq!(ids.len(), 3);
    assert_eq!(*delivered.lock().unwrap(), vec![1, 2, 3]);

    let err = sim
        .publish_batch("orders", vec!["a", "b", "c", "d"])
        .unwrap_err();
    assert!(matches!(err, PubSubError::BatchTooLarge { size: 4, limit: 3 }));

    let pulled = sim.pull_messages("orders-sub", 10, true).unwrap();
    let decoded: Vec<Order> = pulled.iter().map(|e| e.decode().unwrap()).collect();
    assert_eq!(decoded[0], Order { id: 1, sku: "sku-1".into() });
    assert_eq!(decoded.len(), 3);

    let stats = sim.get_global_stats();
    assert_eq!(stats.messages_published, 3);
    assert_eq!(stats.messages_received, 3);
    assert_eq!(stats.messages_failed, 0);
}

#[test]
fn integration_non_json_payload_fails_callback_decode() {
    let mut sim = Simulator::new();
    sim.create_topic("events", None, None);
    sim.create_subscription("events-sub", "events", None, None)
        .unwrap();
    sim.subscribe("events-sub", |env| {
        let _: Order = env.decode()?;
        Ok(())
    })
    .unwrap();

    sim.publish_message("events", "plain text", None).unwrap();

    let letters: Vec<_> = sim.dead_letters().collect();
    assert_eq!(letters.len(), 1);
    assert_eq!(letters[0].topic.as_deref(), Some("events"));
    assert_eq!(
        letters[0].message.as_ref().map(|m| m.data()),
        Some("plain text")
    );
}
