use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Lip-sync cue document produced by the extraction tool
///
/// Holds the tool's JSON text verbatim so that re-serializing a rendered
/// message emits exactly the bytes the tool wrote. Construction checks that
/// a `mouthCues` array is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LipSync(Box<RawValue>);

/// Reasons a cue document is rejected
#[derive(Debug, thiserror::Error)]
pub enum LipSyncParseError {
    /// Text is not valid JSON
    #[error("cue document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON is valid but has no `mouthCues` array
    #[error("cue document has no mouthCues array")]
    MissingCues,
}

/// One timed mouth shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthCue {
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
    /// Mouth shape identifier (e.g. "A", "X")
    pub value: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CueView {
    mouth_cues: Vec<MouthCue>,
}

impl LipSync {
    /// Wrap a cue document, validating its shape
    ///
    /// Surrounding whitespace is dropped; everything else is kept as-is.
    pub fn from_json(text: String) -> Result<Self, LipSyncParseError> {
        let raw = RawValue::from_string(text)?;

        Self::mouth_cues_of(raw.get()).map_err(|_| LipSyncParseError::MissingCues)?;

        Ok(Self(raw))
    }

    /// Raw JSON text of the document
    pub fn as_str(&self) -> &str {
        self.0.get()
    }

    /// Parse the cue sequence
    pub fn mouth_cues(&self) -> Result<Vec<MouthCue>, serde_json::Error> {
        Self::mouth_cues_of(self.0.get())
    }

    fn mouth_cues_of(text: &str) -> Result<Vec<MouthCue>, serde_json::Error> {
        serde_json::from_str::<CueView>(text).map(|view| view.mouth_cues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RHUBARB_OUTPUT: &str = r#"{
  "metadata": {
    "soundFile": "message_0.wav",
    "duration": 0.47
  },
  "mouthCues": [
    { "start": 0.00, "end": 0.05, "value": "X" },
    { "start": 0.05, "end": 0.47, "value": "B" }
  ]
}"#;

    #[test]
    fn parses_rhubarb_output() {
        let lipsync = LipSync::from_json(RHUBARB_OUTPUT.to_owned()).unwrap();
        let cues = lipsync.mouth_cues().unwrap();

        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].value, "B");
        assert!((cues[1].end - 0.47).abs() < f64::EPSILON);
    }

    #[test]
    fn reserializes_verbatim_apart_from_surrounding_whitespace() {
        let lipsync = LipSync::from_json(format!("  {RHUBARB_OUTPUT}\n")).unwrap();
        let json = serde_json::to_string(&lipsync).unwrap();
        assert_eq!(json, RHUBARB_OUTPUT);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).unwrap(),
            serde_json::from_str::<serde_json::Value>(RHUBARB_OUTPUT).unwrap()
        );
    }

    #[test]
    fn rejects_document_without_cues() {
        let err = LipSync::from_json(r#"{"metadata":{}}"#.to_owned()).unwrap_err();
        assert!(matches!(err, LipSyncParseError::MissingCues));
    }

    #[test]
    fn rejects_malformed_cues() {
        let err = LipSync::from_json(r#"{"mouthCues":"nope"}"#.to_owned()).unwrap_err();
        assert!(matches!(err, LipSyncParseError::MissingCues));
    }

    #[test]
    fn rejects_invalid_json() {
        let err = LipSync::from_json("{not json".to_owned()).unwrap_err();
        assert!(matches!(err, LipSyncParseError::Json(_)));
    }
}
