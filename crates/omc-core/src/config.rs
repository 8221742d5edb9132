use serde::{Deserialize, Serialize};

/// Service-wide MIME defaults, applied to any operation that declares no
/// produce/consume lists of its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeDefaults {
    pub produces: Vec<String>,
    pub consumes: Vec<String>,
}

impl MimeDefaults {
    pub fn json() -> Self {
        Self {
            produces: vec![crate::compile::JSON_MIME.to_string()],
            consumes: vec![crate::compile::JSON_MIME.to_string()],
        }
    }
}
