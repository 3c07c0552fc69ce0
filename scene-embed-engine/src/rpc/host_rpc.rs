use bevy::app::AppExit;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

use crate::bridge::camera_bridge::CameraFeed;
use crate::engine::assets::model_source::ModelFetchStats;
use crate::engine::core::app_state::{ActiveModel, ModelSwapRequest, ViewerState};
use crate::engine::loading::progress::progress_fraction;

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Resource managing bidirectional RPC traffic between the host glue and the
/// engine. Lifecycle requests come in; load/camera status goes out.
#[derive(Resource, Default)]
pub struct HostRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl HostRpcInterface {
    /// Send a notification to the host glue without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing the postMessage transport for the element glue.
pub struct HostRpcPlugin;

impl Plugin for HostRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(Startup, announce_viewer_ready)
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

fn announce_viewer_ready(mut rpc: ResMut<HostRpcInterface>) {
    rpc.send_notification("viewer_ready", serde_json::json!({}));
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Cheap pre-filter before full JSON parsing in the handler.
            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(err) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("failed to register message listener: {err:?}");
        }
    }

    // Ownership transfers to the JS GC for the page lifetime.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Thread-safe queue bridging the DOM message callback into the app.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Incoming RPC message relayed from the host glue.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc: ResMut<HostRpcInterface>,
    feed: Res<CameraFeed>,
    active: Res<ActiveModel>,
    state: Res<State<ViewerState>>,
    stats: Res<ModelFetchStats>,
    mut swap_events: EventWriter<ModelSwapRequest>,
    mut exit_events: EventWriter<AppExit>,
) {
    for event in events.read() {
        match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => {
                if let Some(response) = handle_rpc_request(
                    &request,
                    &feed,
                    &active,
                    &state,
                    &stats,
                    &mut swap_events,
                    &mut exit_events,
                ) {
                    rpc.queue_response(response);
                }
            }
            Err(parse_error) => {
                warn!("ignoring malformed host message: {parse_error}");
            }
        }
    }
}

/// Handle one request and generate a response when it carried an id.
fn handle_rpc_request(
    request: &RpcRequest,
    feed: &CameraFeed,
    active: &ActiveModel,
    state: &State<ViewerState>,
    stats: &ModelFetchStats,
    swap_events: &mut EventWriter<ModelSwapRequest>,
    exit_events: &mut EventWriter<AppExit>,
) -> Option<RpcResponse> {
    let result = match request.method.as_str() {
        "set_model" => handle_set_model(&request.params, swap_events),
        "get_camera" => Ok(feed
            .latest
            .and_then(|snapshot| serde_json::to_value(snapshot).ok())
            .unwrap_or(serde_json::Value::Null)),
        "get_status" => Ok(serde_json::json!({
            "state": state_name(*state.get()),
            "model": active.id,
            "progress": progress_fraction(stats.loaded_bytes(), None),
        })),
        "disconnect" => {
            exit_events.write(AppExit::Success);
            Ok(serde_json::json!({ "success": true }))
        }
        _ => {
            warn!("unknown RPC method: {}", request.method);
            Err(RpcError {
                code: -32601,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({ "method": request.method })),
            })
        }
    };

    // Notifications carry no id and get no response.
    let id = request.id.clone()?;

    Some(match result {
        Ok(value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn handle_set_model(
    params: &serde_json::Value,
    swap_events: &mut EventWriter<ModelSwapRequest>,
) -> Result<serde_json::Value, RpcError> {
    let id = model_id_from_params(params)?;
    swap_events.write(ModelSwapRequest { id: id.clone() });
    Ok(serde_json::json!({ "success": true, "id": id }))
}

/// The element's `id` attribute arrives as a string, but hand-written host
/// pages also send bare numbers.
fn model_id_from_params(params: &serde_json::Value) -> Result<String, RpcError> {
    let id = params
        .get("id")
        .ok_or_else(|| RpcError::invalid_params("Expected 'id' parameter"))?;
    match id {
        serde_json::Value::String(s) if !s.is_empty() => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(RpcError::invalid_params(
            "'id' must be a non-empty string or a number",
        )),
    }
}

fn state_name(state: ViewerState) -> &'static str {
    match state {
        ViewerState::Initializing => "initializing",
        ViewerState::LoadingModel => "loading",
        ViewerState::Ready => "ready",
        ViewerState::Failed => "failed",
    }
}

/// Flush queued notifications and responses to the host glue.
fn send_outgoing_messages(mut rpc: ResMut<HostRpcInterface>) {
    for notification in rpc.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }
    for response in rpc.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Post a serialized message to the embedding page.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(err) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("failed to post message to host: {err:?}");
                        }
                    }
                }
            }
            Err(err) => {
                error!("failed to serialize host message: {err}");
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_accepts_strings_and_numbers() {
        assert_eq!(
            model_id_from_params(&serde_json::json!({ "id": "3" })).unwrap(),
            "3"
        );
        assert_eq!(
            model_id_from_params(&serde_json::json!({ "id": 7 })).unwrap(),
            "7"
        );
    }

    #[test]
    fn test_model_id_rejects_missing_or_malformed_params() {
        assert!(model_id_from_params(&serde_json::json!({})).is_err());
        assert!(model_id_from_params(&serde_json::json!({ "id": "" })).is_err());
        assert!(model_id_from_params(&serde_json::json!({ "id": [1, 2] })).is_err());
    }

    #[test]
    fn test_requests_parse_from_host_json() {
        let request: RpcRequest = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "method": "set_model", "params": {"id": "2"}, "id": 1}"#,
        )
        .unwrap();
        assert_eq!(request.method, "set_model");
        assert_eq!(request.params["id"], "2");
    }
}
