//! Per-call fault containment and diagnostics for extractor entry points
//!
//! Every public extractor runs its body through [`contain`], which turns a
//! panic into [`DecodeError::InternalFault`] instead of unwinding into the
//! caller. Diagnostic events are emitted from inside the guarded region so a
//! misbehaving subscriber is contained as well.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace, warn};

use crate::error::DecodeError;

/// Run `body` for a reply rooted at `document`, converting panics to errors.
///
/// On the success path this only forwards the body's result.
pub(crate) fn contain<T, F>(document: &'static str, body: F) -> Result<T, DecodeError>
where
    F: FnOnce() -> Result<T, DecodeError>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            // The subscriber itself may be what panicked
            let _ = panic::catch_unwind(|| {
                warn!(document, %message, "Contained fault while decoding reply");
            });
            Err(DecodeError::InternalFault { document, message })
        }
    }
}

/// Guarded entry point shared by the extractors: logs the input, then runs `extract`.
pub(crate) fn decode_reply<T, F>(
    document: &'static str,
    text: &str,
    extract: F,
) -> Result<T, DecodeError>
where
    F: FnOnce(&str) -> Result<T, DecodeError>,
{
    contain(document, || {
        debug!(document, bytes = text.len(), "Decoding reply");
        trace!(document, raw = text, "Raw reply");
        extract(text)
    })
}

/// Structural decode of `text` into a raw document model rooted at `<document>`
pub(crate) fn from_xml<T: DeserializeOwned>(
    document: &'static str,
    text: &str,
) -> Result<T, DecodeError> {
    if let Some(found) = root_element(document, text)? {
        if found != document {
            return Err(DecodeError::Malformed {
                document,
                reason: format!("expected element type <{}> but have <{}>", document, found),
            });
        }
    }
    from_xml_any_root(document, text)
}

/// Structural decode that accepts whatever the root element is called
pub(crate) fn from_xml_any_root<T: DeserializeOwned>(
    document: &'static str,
    text: &str,
) -> Result<T, DecodeError> {
    quick_xml::de::from_str(text).map_err(|e| DecodeError::malformed(document, e))
}

/// Local name of the first element in `text`, `None` for a document without one
fn root_element(document: &'static str, text: &str) -> Result<Option<String>, DecodeError> {
    let mut reader = Reader::from_str(text);
    loop {
        let event = reader.read_event().map_err(|e| DecodeError::Malformed {
            document,
            reason: e.to_string(),
        })?;
        match event {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                return Ok(Some(name));
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Field decoder for single-valued elements that devices sometimes repeat.
///
/// Accepts one or several occurrences and keeps the last, absent yields the default.
pub(crate) fn last<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let mut values = Vec::<T>::deserialize(deserializer)?;
    Ok(values.pop().unwrap_or_default())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
