// Transient status feedback for the popup surface.
// Pure presentation: emit, schedule a clear, never retry.

use serde::Serialize;
use tauri::{AppHandle, Emitter};

/// Status messages auto-clear after this long.
pub const STATUS_CLEAR_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusPayload {
    pub message: String,
    pub kind: StatusKind,
}

/// Surface a transient message on the popup. The matching clear event is
/// emitted after STATUS_CLEAR_MS; a newer report simply overwrites.
pub fn report(app: &AppHandle, message: impl Into<String>, kind: StatusKind) {
    let payload = StatusPayload {
        message: message.into(),
        kind,
    };
    if let Err(e) = app.emit("capture-status", payload) {
        log::warn!("[Status] Failed to emit status: {}", e);
        return;
    }

    let app = app.clone();
    tauri::async_runtime::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_millis(STATUS_CLEAR_MS)).await;
        let _ = app.emit("capture-status-clear", ());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_shape() {
        let payload = StatusPayload {
            message: "2 tab(s) sent to Later.".to_string(),
            kind: StatusKind::Success,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(
            json,
            r#"{"message":"2 tab(s) sent to Later.","kind":"success"}"#
        );
    }
}
