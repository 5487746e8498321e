//! Inbound event envelope consumed by one routing decision.

use serde_json::{Map, Value};
use uuid::Uuid;

const TOPIC_ATTRIBUTE: &str = "topic";
const ID_ATTRIBUTE: &str = "id";

/// One published event: a topic name plus an attribute mapping.
///
/// The engine is agnostic to how the envelope was deserialized from wire
/// format; attributes are plain JSON values. `topic` and a generated `id`
/// are always present, callers attach whatever envelope metadata their
/// broker carries (`source`, `type`, `pubsubname`, `data`, ...).
#[derive(Debug, Clone)]
pub struct Event {
    topic: String,
    attributes: Map<String, Value>,
}

impl Event {
    /// Creates an event on `topic`, stamping `topic` and a fresh `id`
    /// attribute.
    pub fn new(topic: &str) -> Self {
        let mut attributes = Map::new();
        attributes.insert(TOPIC_ATTRIBUTE.to_string(), Value::from(topic));
        attributes.insert(
            ID_ATTRIBUTE.to_string(),
            Value::from(Uuid::new_v4().to_string()),
        );

        Self {
            topic: topic.to_string(),
            attributes,
        }
    }

    /// Creates an event from a pre-assembled attribute mapping, forcing the
    /// `topic` attribute to agree with `topic`.
    pub fn from_attributes(topic: &str, mut attributes: Map<String, Value>) -> Self {
        attributes.insert(TOPIC_ATTRIBUTE.to_string(), Value::from(topic));

        Self {
            topic: topic.to_string(),
            attributes,
        }
    }

    /// Attaches one attribute, builder style.
    pub fn with_attribute(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if name == TOPIC_ATTRIBUTE {
            self.topic = value.as_str().unwrap_or_default().to_string();
        }
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub(crate) fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::Event;
    use serde_json::{json, Map, Value};

    #[test]
    fn new_stamps_topic_and_id_attributes() {
        let event = Event::new("orders");

        assert_eq!(event.topic(), "orders");
        assert_eq!(event.attribute("topic"), Some(&Value::from("orders")));
        assert!(event.attribute("id").is_some());
    }

    #[test]
    fn from_attributes_forces_topic_agreement() {
        let mut attributes = Map::new();
        attributes.insert("topic".to_string(), json!("stale"));
        attributes.insert("source".to_string(), json!("checkout"));

        let event = Event::from_attributes("orders", attributes);

        assert_eq!(event.topic(), "orders");
        assert_eq!(event.attribute("topic"), Some(&Value::from("orders")));
        assert_eq!(event.attribute("source"), Some(&Value::from("checkout")));
    }

    #[test]
    fn with_attribute_keeps_topic_in_sync() {
        let event = Event::new("orders").with_attribute("topic", "billing");
        assert_eq!(event.topic(), "billing");
    }
}
