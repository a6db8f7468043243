//! JSON-lines encoding of outbound channel frames written to stdout.

use client_core::ChannelFrame;
use serde::Serialize;
use shared::protocol::ServiceMessage;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireFrame<'a> {
    Subscribe {
        service: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        topic: Option<&'static str>,
    },
    Message {
        service: &'a str,
        message: &'a ServiceMessage,
    },
}

pub fn encode_frame(frame: &ChannelFrame, service: &str) -> serde_json::Result<String> {
    let wire = match frame {
        ChannelFrame::Subscribe(subscription) => WireFrame::Subscribe {
            service,
            topic: subscription.topic(),
        },
        ChannelFrame::Send(message) => WireFrame::Message { service, message },
    };
    serde_json::to_string(&wire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use shared::protocol::{ServiceCommand, Subscription};

    #[test]
    fn subscriptions_name_their_topic() {
        let line = encode_frame(&ChannelFrame::Subscribe(Subscription::GetClients), "py4j")
            .expect("encode");
        let value: Value = serde_json::from_str(&line).expect("json");
        assert_eq!(
            value,
            json!({"type": "subscribe", "service": "py4j", "topic": "getClients"})
        );
    }

    #[test]
    fn event_sink_subscription_has_no_topic() {
        let line = encode_frame(&ChannelFrame::Subscribe(Subscription::EventSink), "py4j")
            .expect("encode");
        assert!(!line.contains("topic"));
    }

    #[test]
    fn messages_carry_method_and_arguments() {
        let msg = ServiceCommand::Exec {
            code: "print(1)".to_string(),
        }
        .into_message();
        let line = encode_frame(&ChannelFrame::Send(msg), "py4j").expect("encode");
        let value: Value = serde_json::from_str(&line).expect("json");

        assert_eq!(value["type"], "message");
        assert_eq!(value["message"]["method"], "exec");
        assert_eq!(value["message"]["data"], json!(["print(1)"]));
    }
}
