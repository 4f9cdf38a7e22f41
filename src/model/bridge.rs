//! HTTP bridge to an external MusicGen inference server.
//!
//! The heavy model runs out of process; this backend sends prompts and a
//! duration to its `/generate` endpoint and decodes the waveform batch
//! from the JSON response.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuralisError, Result};
use crate::model::provider::{MusicModel, Waveform};

/// Default request timeout. Synthesis is slow; 5 minutes covers a 30s clip on CPU.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompts: &'a [String],
    duration_sec: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    sample_rate: u32,
    waveforms: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    sample_rate: u32,
    model_version: String,
}

/// Music model backed by a remote inference server.
pub struct BridgeModel {
    client: reqwest::blocking::Client,
    base_url: String,
    sample_rate: u32,
    version: String,
    duration_sec: u32,
}

impl BridgeModel {
    /// Connects to the inference server and reads its model info.
    ///
    /// Fails if the server is unreachable, so a misconfigured bridge is
    /// reported at startup rather than on the first generation request.
    pub fn connect(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| {
                AuralisError::model_load_failed(format!("Failed to build HTTP client: {}", e))
            })?;

        let info: InfoResponse = client
            .get(format!("{}/info", base_url))
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| {
                AuralisError::model_load_failed(format!(
                    "Inference server at {} is not reachable: {}",
                    base_url, e
                ))
            })?;

        debug!(
            base_url,
            sample_rate = info.sample_rate,
            version = %info.model_version,
            "connected to inference bridge"
        );

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            sample_rate: info.sample_rate,
            version: info.model_version,
            duration_sec: 0,
        })
    }
}

impl MusicModel for BridgeModel {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn set_duration(&mut self, duration_sec: u32) -> Result<()> {
        self.duration_sec = duration_sec;
        Ok(())
    }

    fn generate(&mut self, prompts: &[String]) -> Result<Vec<Waveform>> {
        if self.duration_sec == 0 {
            return Err(AuralisError::generation_failed(
                "Generation requested before a duration was configured",
            ));
        }

        let request = GenerateRequest {
            prompts,
            duration_sec: self.duration_sec,
        };

        let response: GenerateResponse = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&request)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.json())
            .map_err(|e| {
                AuralisError::generation_failed(format!("Inference request failed: {}", e))
            })?;

        if response.waveforms.len() != prompts.len() {
            return Err(AuralisError::generation_failed(format!(
                "Server returned {} waveforms for {} prompts",
                response.waveforms.len(),
                prompts.len()
            )));
        }

        Ok(response
            .waveforms
            .into_iter()
            .map(|samples| Waveform::new(samples, response.sample_rate))
            .collect())
    }

    fn version(&self) -> &str {
        &self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_shape() {
        let prompts = vec!["calm piano".to_string()];
        let request = GenerateRequest {
            prompts: &prompts,
            duration_sec: 10,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["duration_sec"], 10);
        assert_eq!(json["prompts"][0], "calm piano");
    }

    #[test]
    fn response_deserializes_waveform_batch() {
        let json = r#"{"sample_rate":32000,"waveforms":[[0.0,0.5,-0.5]]}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.sample_rate, 32000);
        assert_eq!(response.waveforms[0].len(), 3);
    }
}
