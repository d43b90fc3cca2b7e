use serde::Serialize;

pub const SESSION_MODEL: &str = "gpt-realtime-mini";
pub const SESSION_VOICE: &str = "alloy";

// Fixed configuration object sent to the upstream session endpoint.
// Nothing from the inbound request flows into this body
#[derive(Serialize, Clone)]
pub struct UpstreamSessionRequest {
    pub model: String,
    pub modalities: Vec<String>,
    pub voice: String,
    pub output_audio_format: String,
    pub output_sample_rate: u32,
    pub phoneme_timestamps: bool,
    pub turn_detection: TurnDetection,
    pub input_audio_transcription: InputTranscription,
}

#[derive(Serialize, Clone)]
pub struct TurnDetection {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Serialize, Clone)]
pub struct InputTranscription {
    pub model: String,
}

impl UpstreamSessionRequest {
    pub fn fixed() -> Self {
        Self {
            model: SESSION_MODEL.to_string(),
            modalities: vec!["audio".to_string(), "text".to_string()],
            voice: SESSION_VOICE.to_string(),
            output_audio_format: "pcm16".to_string(),
            output_sample_rate: 24_000,
            phoneme_timestamps: true,
            turn_detection: TurnDetection {
                kind: "server_vad".to_string(),
            },
            input_audio_transcription: InputTranscription {
                model: "whisper-1".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_body_serializes_expected_shape() {
        let body = serde_json::to_value(UpstreamSessionRequest::fixed()).unwrap();
        assert_eq!(body["model"], SESSION_MODEL);
        assert_eq!(body["modalities"], serde_json::json!(["audio", "text"]));
        assert_eq!(body["turn_detection"]["type"], "server_vad");
        assert_eq!(body["input_audio_transcription"]["model"], "whisper-1");
        assert_eq!(body["phoneme_timestamps"], true);
        assert_eq!(body["output_sample_rate"], 24_000);
    }
}
