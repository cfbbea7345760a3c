// SCRIPTFORGE JSON Extractor - Best-Effort Recovery of Model Output
// Copyright (c) 2026 ScriptForge | SCRIPTFORGE

use serde_json::Value;
use tracing::warn;

/// Parse a model response as JSON. Models frequently wrap the object in
/// prose or markdown fences, so on a direct parse failure the outermost
/// `{...}` substring is extracted and retried. A second failure propagates:
/// this is best-effort recovery, not a repair pass.
pub fn force_json(text: &str) -> serde_json::Result<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let start = text.find('{');
            let end = text.rfind('}');
            if let (Some(start), Some(end)) = (start, end) {
                if start < end {
                    warn!("[EXTRACT] direct parse failed, retrying on brace slice");
                    return serde_json::from_str(&text[start..=end]);
                }
            }
            Err(first_err)
        }
    }
}
