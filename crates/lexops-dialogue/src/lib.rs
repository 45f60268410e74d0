//! Lex V2 dialogue code hook.
//!
//! Every turn is answered by asking the user for the next intent.  During a
//! dialog code hook the reply names the intent Lex recognised, which makes
//! the hook useful for exercising freshly imported bots; fulfilment turns
//! end the query.

use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// The parts of a Lex V2 code hook event the hook reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHookEvent {
    #[serde(default)]
    pub bot: Option<Value>,
    #[serde(default)]
    pub invocation_source: Option<String>,
    #[serde(default)]
    pub input_transcript: String,
    #[serde(default)]
    pub session_state: SessionState,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub session_attributes: Map<String, Value>,
    #[serde(default)]
    pub intent: Option<Value>,
}

impl CodeHookEvent {
    /// Whether the event came from a bot.  Test invocations without one,
    /// or with an empty `bot` object, are answered with an empty object.
    pub fn has_bot(&self) -> bool {
        match &self.bot {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Object(bot)) => !bot.is_empty(),
            Some(Value::String(name)) => !name.is_empty(),
            Some(_) => true,
        }
    }

    pub fn intent_name(&self) -> &str {
        self.session_state
            .intent
            .as_ref()
            .and_then(|i| i.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn is_dialog_code_hook(&self) -> bool {
        self.invocation_source.as_deref() == Some("DialogCodeHook")
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Dialog action types a code hook may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogActionType {
    Close,
    ConfirmIntent,
    Delegate,
    ElicitIntent,
    ElicitSlot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub kind: DialogActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub content_type: &'static str,
    pub content: String,
}

impl Message {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: "PlainText",
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSessionState {
    pub session_attributes: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<Value>,
    pub dialog_action: DialogAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeHookResponse {
    pub session_state: ResponseSessionState,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
}

impl CodeHookResponse {
    /// Build a response.  `ElicitIntent` never carries an intent and an
    /// empty message is left out.
    pub fn new(
        session_attributes: Map<String, Value>,
        intent: Option<Value>,
        action: DialogActionType,
        slot_to_elicit: Option<String>,
        message: &str,
    ) -> Self {
        let intent = match action {
            DialogActionType::ElicitIntent => None,
            _ => intent,
        };
        let messages = if message.is_empty() {
            Vec::new()
        } else {
            vec![Message::plain_text(message)]
        };
        Self {
            session_state: ResponseSessionState {
                session_attributes,
                intent,
                dialog_action: DialogAction {
                    kind: action,
                    slot_to_elicit,
                },
            },
            messages,
        }
    }
}

/// The hook's answer to `event`, `None` for events without a bot.
pub fn respond(event: &CodeHookEvent) -> Option<CodeHookResponse> {
    if !event.has_bot() {
        return None;
    }
    let message = if event.is_dialog_code_hook() {
        format!("Intent identified as {}", event.intent_name())
    } else {
        "End of query".to_string()
    };
    Some(CodeHookResponse::new(
        event.session_state.session_attributes.clone(),
        event.session_state.intent.clone(),
        DialogActionType::ElicitIntent,
        None,
        &message,
    ))
}

/// Lambda entry point.
pub async fn handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    let LambdaEvent { payload, context } = event;
    let event: CodeHookEvent = serde_json::from_value(payload)?;
    info!(
        request_id = %context.request_id,
        intent = event.intent_name(),
        source = event.invocation_source.as_deref().unwrap_or(""),
        transcript = %event.input_transcript,
        "code hook invoked"
    );
    match respond(&event) {
        Some(response) => Ok(serde_json::to_value(response)?),
        None => Ok(Value::Object(Map::new())),
    }
}
