use metric_mutator::event::Event;
use serde_json::{Value, json};

/// A Sensu event shaped like the ones the backend pipes to mutators.
#[must_use]
pub fn event_payload(labels: Value) -> Value {
    json!({
        "timestamp": 1_700_000_000,
        "id": "3c2d1e0f-8a7b-4c5d-9e8f-0a1b2c3d4e5f",
        "entity": {
            "entity_class": "agent",
            "system": {"hostname": "h1", "os": "linux", "platform": "ubuntu"},
            "subscriptions": ["linux", "entity:h1"],
            "metadata": {"name": "h1", "namespace": "default"}
        },
        "check": {
            "command": "check-disk-usage -w 80 -c 90",
            "handlers": ["influxdb"],
            "interval": 60,
            "duration": 1.5,
            "executed": 1_699_999_998,
            "issued": 1_699_999_998,
            "output": "CRITICAL: / is 93% full",
            "status": 2,
            "output_metric_format": "",
            "metadata": {
                "name": "disk",
                "namespace": "default",
                "labels": labels
            }
        },
        "metrics": {"handlers": ["influxdb"]}
    })
}

#[must_use]
pub fn payload_bytes(payload: &Value) -> Vec<u8> {
    serde_json::to_vec(payload).expect("failed to encode payload")
}

#[must_use]
pub fn decode(output: &[u8]) -> (Event, Value) {
    let event = serde_json::from_slice(output).expect("output should be an event");
    let value = serde_json::from_slice(output).expect("output should be json");
    (event, value)
}
