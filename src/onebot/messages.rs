use serde::{Deserialize, Serialize};

use crate::config::BotIdentity;

/// Any frame the bot framework sends over the reverse websocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InboundFrame {
    Response(ActionResponse),
    Event(OneBotEvent),
}

/// Reply to an action we sent earlier.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionResponse {
    pub status: String,
    pub retcode: i64,
}

impl ActionResponse {
    pub fn is_ok(&self) -> bool {
        self.retcode == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OneBotEvent {
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub self_id: Option<i64>,
    #[serde(default)]
    pub group_id: Option<i64>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub message: Option<MessageContent>,
}

/// Message body, either as a segment array or as a raw CQ-code string,
/// depending on how the framework is configured.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Segments(Vec<MessageSegment>),
    Text(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageSegment {
    #[serde(rename = "type", default)]
    pub segment_type: String,
    #[serde(default)]
    pub data: SegmentData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SegmentData {
    #[serde(default)]
    pub text: Option<String>,
}

impl OneBotEvent {
    pub fn is_group_message(&self) -> bool {
        self.post_type.as_deref() == Some("message")
            && self.message_type.as_deref() == Some("group")
    }

    /// Text of the first segment, the only part commands are matched against.
    pub fn first_text(&self) -> Option<&str> {
        match self.message.as_ref()? {
            MessageContent::Segments(segments) => segments.first()?.data.text.as_deref(),
            MessageContent::Text(text) => Some(text.as_str()),
        }
    }
}

/// Outbound action frame.
#[derive(Debug, Clone, Serialize)]
pub struct OneBotAction<P> {
    pub action: &'static str,
    pub params: P,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessageParams {
    pub message_type: &'static str,
    pub group_id: i64,
    pub messages: Vec<ForwardNode>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForwardNode {
    #[serde(rename = "type")]
    pub node_type: &'static str,
    pub data: ForwardNodeData,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForwardNodeData {
    pub user_id: i64,
    pub nickname: String,
    pub content: String,
}

impl OneBotAction<ForwardMessageParams> {
    /// Wraps `content` as a single forwarded node posted to `group_id`.
    pub fn send_forward_msg(group_id: i64, sender: &BotIdentity, content: String) -> Self {
        Self {
            action: "send_forward_msg",
            params: ForwardMessageParams {
                message_type: "group",
                group_id,
                messages: vec![ForwardNode {
                    node_type: "node",
                    data: ForwardNodeData {
                        user_id: sender.user_id,
                        nickname: sender.nickname.clone(),
                        content,
                    },
                }],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_group_message_segments() {
        let frame: InboundFrame = serde_json::from_value(json!({
            "post_type": "message",
            "message_type": "group",
            "self_id": 10,
            "group_id": 42,
            "user_id": 7,
            "message": [
                {"type": "text", "data": {"text": "#top"}},
                {"type": "face", "data": {"id": "1"}}
            ]
        }))
        .unwrap();

        let InboundFrame::Event(event) = frame else {
            panic!("expected an event");
        };
        assert!(event.is_group_message());
        assert_eq!(event.group_id, Some(42));
        assert_eq!(event.first_text(), Some("#top"));
    }

    #[test]
    fn parses_string_message() {
        let event: OneBotEvent = serde_json::from_value(json!({
            "post_type": "message",
            "message_type": "private",
            "message": "#top"
        }))
        .unwrap();

        assert!(!event.is_group_message());
        assert_eq!(event.first_text(), Some("#top"));
    }

    #[test]
    fn non_text_first_segment_has_no_text() {
        let event: OneBotEvent = serde_json::from_value(json!({
            "post_type": "message",
            "message_type": "group",
            "message": [{"type": "image", "data": {"file": "a.png"}}]
        }))
        .unwrap();

        assert_eq!(event.first_text(), None);
    }

    #[test]
    fn action_responses_are_told_apart_from_events() {
        let frame: InboundFrame =
            serde_json::from_value(json!({"status": "failed", "retcode": 100, "data": null}))
                .unwrap();

        let InboundFrame::Response(response) = frame else {
            panic!("expected a response");
        };
        assert!(!response.is_ok());
    }

    #[test]
    fn heartbeat_parses_as_event() {
        let frame: InboundFrame = serde_json::from_value(json!({
            "post_type": "meta_event",
            "meta_event_type": "heartbeat",
            "self_id": 10
        }))
        .unwrap();

        assert!(matches!(frame, InboundFrame::Event(ref e) if !e.is_group_message()));
    }

    #[test]
    fn forward_message_serializes_in_onebot_shape() {
        let sender = BotIdentity {
            user_id: 99,
            nickname: "Board".into(),
        };
        let action = OneBotAction::send_forward_msg(42, &sender, "Top\n1. A: 1".into());

        assert_eq!(
            serde_json::to_value(&action).unwrap(),
            json!({
                "action": "send_forward_msg",
                "params": {
                    "message_type": "group",
                    "group_id": 42,
                    "messages": [{
                        "type": "node",
                        "data": {"user_id": 99, "nickname": "Board", "content": "Top\n1. A: 1"}
                    }]
                }
            })
        );
    }
}
