//! Error taxonomy shared by every extractor

use quick_xml::errors::serialize::DeError;
use thiserror::Error;

/// Failure to turn a reply into facts.
///
/// Missing elements are never an error: device XML routinely omits
/// optional data, and extractors return empty values instead. Only
/// markup that cannot be decoded at all ends up here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The reply is not well-formed XML or does not have the expected element structure
    #[error("Failed to decode <{document}> reply: {reason}")]
    Malformed {
        document: &'static str,
        reason: String,
    },
    /// An unexpected fault (panic) occurred while decoding and was contained
    #[error("Internal fault while decoding <{document}> reply: {message}")]
    InternalFault {
        document: &'static str,
        message: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(document: &'static str, err: DeError) -> Self {
        Self::Malformed {
            document,
            reason: err.to_string(),
        }
    }

    /// Root element of the reply that failed to decode
    pub fn document(&self) -> &'static str {
        match self {
            Self::Malformed { document, .. } | Self::InternalFault { document, .. } => document,
        }
    }

    /// True when the failure was a contained panic rather than bad markup
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::InternalFault { .. })
    }
}
