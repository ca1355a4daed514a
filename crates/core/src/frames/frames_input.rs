use serde::Deserialize;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// User input posted back from the previous card.
///
/// The payload is client-supplied and unverified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    input_text: Option<String>,
}

#[derive(Deserialize)]
struct FramePayload {
    #[serde(rename = "untrustedData", default)]
    untrusted_data: Option<UntrustedData>,
}

#[derive(Deserialize)]
struct UntrustedData {
    #[serde(rename = "inputText", default)]
    input_text: Option<String>,
}

#[derive(Deserialize)]
struct FormPayload {
    #[serde(rename = "inputText", default)]
    input_text: Option<String>,
}

impl FrameInput {
    pub fn new(input_text: Option<&str>) -> Self {
        let input_text = input_text
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { input_text }
    }

    /// Decodes a card post body.
    ///
    /// JSON bodies carry `{"untrustedData": {"inputText": ...}}`; form bodies
    /// carry a flat `inputText` field. Anything undecodable counts as no input.
    pub fn decode(content_type: Option<&str>, body: &[u8]) -> Self {
        let is_form = content_type
            .map(|ct| ct.trim().to_ascii_lowercase().starts_with(FORM_CONTENT_TYPE))
            .unwrap_or(false);

        let text = if is_form {
            serde_urlencoded::from_bytes::<FormPayload>(body)
                .ok()
                .and_then(|p| p.input_text)
        } else {
            serde_json::from_slice::<FramePayload>(body)
                .ok()
                .and_then(|p| p.untrusted_data)
                .and_then(|d| d.input_text)
        };
        Self::new(text.as_deref())
    }

    /// Trimmed, non-empty text the user typed.
    pub fn text(&self) -> Option<&str> {
        self.input_text.as_deref()
    }

    pub fn text_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.text().unwrap_or(default)
    }
}
