// Handoff dispatcher - delivers an export envelope to the Later app.
// Tries the direct later:// channel first, degrades to the clipboard.
// Sequential state machine; terminal on first success or final fallback.

use std::time::Duration;

use crate::bridge::HostBridge;
use crate::error::CaptureError;
use crate::modules::envelope::{ExportEnvelope, UrlRecord};

/// Receiving endpoints. later:///clipboard-import exists on the app side
/// but belongs to the clipboard-first protocol generation; this sender
/// only ever emits these two.
const ADD_ENDPOINT: &str = "later:///add";
const IMPORT_ENDPOINT: &str = "later:///import";

/// The receiving endpoint cannot be assumed to accept longer URLs.
pub const DIRECT_URL_MAX_LEN: usize = 2000;

/// How long to wait for an explicit error from the external-scheme open.
/// The OS does not reliably report an unregistered or slow handler, so
/// silence within this window counts as delivered.
pub const INVOKE_GRACE_MS: u64 = 400;

/// Result of one external-scheme invocation. Fire-and-forget scheme
/// opens cannot signal success reliably, so the ambiguity stays visible
/// here instead of collapsing into a bool.
#[derive(Debug)]
pub enum InvokeOutcome {
    /// The open call resolved without error inside the grace window.
    Confirmed,
    /// The open call reported an explicit error inside the grace window.
    Failed(String),
    /// No signal inside the grace window; optimistically delivered.
    AssumedDelivered,
}

/// Which channel ultimately carried the envelope.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DeliveryChannel {
    Direct,
    Clipboard,
}

/// Deep link for a single record: scheme:///add?url=&title=&category=
pub fn single_add_link(record: &UrlRecord, category_name: &str) -> String {
    format!(
        "{}?url={}&title={}&category={}",
        ADD_ENDPOINT,
        urlencoding::encode(&record.url),
        urlencoding::encode(&record.title),
        urlencoding::encode(category_name)
    )
}

/// Deep link for a bulk handoff: scheme:///import?data=<encoded envelope>
pub fn bulk_import_link(envelope_json: &str) -> String {
    format!("{}?data={}", IMPORT_ENDPOINT, urlencoding::encode(envelope_json))
}

/// Invoke the scheme link under a bounded wait. The in-flight open future
/// is dropped on every exit path, including the assumed-success one.
async fn invoke_with_grace(bridge: &dyn HostBridge, link: &str) -> InvokeOutcome {
    let grace = Duration::from_millis(INVOKE_GRACE_MS);
    match tokio::time::timeout(grace, bridge.invoke_external(link)).await {
        Ok(Ok(())) => InvokeOutcome::Confirmed,
        Ok(Err(reason)) => InvokeOutcome::Failed(reason),
        Err(_elapsed) => InvokeOutcome::AssumedDelivered,
    }
}

/// Deliver the envelope.
///
/// Exactly one record goes through the single-record /add endpoint;
/// two or more are serialized into the bulk /import link, unless the
/// encoded link would exceed the ceiling, in which case the direct
/// attempt is skipped entirely. Any direct failure degrades to one
/// clipboard write; only a clipboard failure is terminal.
pub async fn dispatch(
    bridge: &dyn HostBridge,
    envelope: &ExportEnvelope,
    category_name: &str,
) -> Result<DeliveryChannel, CaptureError> {
    if envelope.urls.is_empty() {
        return Err(CaptureError::NoTarget);
    }

    let json = serde_json::to_string(envelope)?;

    let direct_link = if envelope.urls.len() == 1 {
        Some(single_add_link(&envelope.urls[0], category_name))
    } else {
        let link = bulk_import_link(&json);
        if link.len() > DIRECT_URL_MAX_LEN {
            log::info!(
                "[Dispatch] Bulk link is {} chars (ceiling {}), skipping direct handoff",
                link.len(),
                DIRECT_URL_MAX_LEN
            );
            None
        } else {
            Some(link)
        }
    };

    if let Some(link) = direct_link {
        match invoke_with_grace(bridge, &link).await {
            InvokeOutcome::Confirmed => {
                log::info!("[Dispatch] Direct handoff confirmed ({} record(s))", envelope.urls.len());
                return Ok(DeliveryChannel::Direct);
            }
            InvokeOutcome::AssumedDelivered => {
                log::info!(
                    "[Dispatch] No error within {}ms grace, assuming delivered",
                    INVOKE_GRACE_MS
                );
                return Ok(DeliveryChannel::Direct);
            }
            InvokeOutcome::Failed(reason) => {
                let err = CaptureError::DirectHandoff(reason);
                log::warn!("[Dispatch] {}; falling back to clipboard", err);
            }
        }
    }

    bridge
        .write_clipboard(&json)
        .await
        .map_err(CaptureError::Clipboard)?;
    log::info!("[Dispatch] Envelope placed on clipboard ({} record(s))", envelope.urls.len());
    Ok(DeliveryChannel::Clipboard)
}
