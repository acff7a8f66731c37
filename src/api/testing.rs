//! Scripted transport for driving clients and controllers in host tests.

use super::{ApiError, ApiRequest, ApiResult, RawResponse, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

enum Reply {
    Ready(ApiResult<RawResponse>),
    Gated(oneshot::Receiver<ApiResult<RawResponse>>),
}

#[derive(Default)]
struct Script {
    replies: VecDeque<Reply>,
    requests: Vec<ApiRequest>,
}

/// Answers requests in FIFO order from a queue of scripted replies.
///
/// Gated replies resolve only when the test sends on the returned channel,
/// which lets a test choose the order in which concurrent requests finish.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

impl ScriptedTransport {
    fn push(&self, reply: Reply) {
        if let Ok(mut script) = self.script.lock() {
            script.replies.push_back(reply);
        }
    }

    pub fn reply(&self, status: u16, body: Value) {
        self.push(Reply::Ready(Ok(RawResponse { status, body })));
    }

    pub fn fail_network(&self, message: &str) {
        self.push(Reply::Ready(Err(ApiError::Network(message.to_string()))));
    }

    pub fn gated(&self) -> oneshot::Sender<ApiResult<RawResponse>> {
        let (tx, rx) = oneshot::channel();
        self.push(Reply::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.script
            .lock()
            .map(|s| s.requests.clone())
            .unwrap_or_default()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<RawResponse> {
        let reply = {
            let mut script = self
                .script
                .lock()
                .map_err(|_| ApiError::Network("script poisoned".to_string()))?;
            script.requests.push(request);
            script.replies.pop_front()
        };

        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".to_string()))),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}

/// `{success: true, data}` response.
pub(crate) fn ok_envelope(data: Value) -> ApiResult<RawResponse> {
    Ok(RawResponse {
        status: 200,
        body: serde_json::json!({"success": true, "data": data}),
    })
}
