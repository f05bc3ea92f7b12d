//! Blocking HTTP client for the OneSky platform API.
//!
//! | Operation           | Request                                                   |
//! |---------------------|-----------------------------------------------------------|
//! | export              | `GET  /1/projects/{id}/translations/app-descriptions`     |
//! | translation status  | `GET  /1/projects/{id}/translations/status`               |
//! | submit              | `POST /1/projects/{id}/files` (multipart)                 |
//!
//! Every request carries `api_key`, `timestamp` and
//! `dev_hash = md5(timestamp + secret_key)`.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;

use metasync_core::{Connection, Credentials, Locale, ProjectId, Submission, SubmitOutcome};

use crate::error::OneSkyError;
use crate::multipart::Form;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://platform.api.onesky.io";

const TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

/// Per-request authentication parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthParams {
    pub api_key: String,
    pub timestamp: String,
    pub dev_hash: String,
}

impl AuthParams {
    pub fn at(credentials: &Credentials, timestamp: u64) -> Self {
        let timestamp = timestamp.to_string();
        let digest = md5::compute(format!("{timestamp}{}", credentials.secret_key));
        Self {
            api_key: credentials.public_key.clone(),
            timestamp,
            dev_hash: format!("{digest:x}"),
        }
    }

    pub fn now(credentials: &Credentials) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        Self::at(credentials, secs)
    }

    fn apply(&self, request: ureq::Request) -> ureq::Request {
        request
            .query("api_key", &self.api_key)
            .query("timestamp", &self.timestamp)
            .query("dev_hash", &self.dev_hash)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct StatusEnvelope {
    data: TranslationStatus,
}

#[derive(Debug, Deserialize)]
struct TranslationStatus {
    /// e.g. `"92.5%"`
    progress: String,
}

/// `true` when progress is strictly between 0% and 100%.
fn in_translation(progress: &str) -> bool {
    progress
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map(|p| p > 0.0 && p < 100.0)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A connection to one OneSky account.
#[derive(Debug, Clone)]
pub struct OneSkyClient {
    agent: ureq::Agent,
    base_url: String,
    credentials: Credentials,
}

impl OneSkyClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_read(TIMEOUT)
            .timeout_write(TIMEOUT)
            .build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            credentials,
        }
    }

    fn url(&self, project_id: &ProjectId, path: &str) -> String {
        format!("{}/1/projects/{}/{path}", self.base_url, project_id)
    }

    /// Whether `file_name` in `locale` currently has translation in progress.
    /// A file the platform does not know yet is never in translation.
    pub fn is_in_translation(
        &self,
        project_id: &ProjectId,
        file_name: &str,
        locale: &Locale,
    ) -> Result<bool, OneSkyError> {
        let auth = AuthParams::now(&self.credentials);
        let request = self
            .agent
            .get(&self.url(project_id, "translations/status"))
            .query("file_name", file_name)
            .query("locale", locale.as_str());

        match auth.apply(request).call() {
            Ok(response) => {
                let status: StatusEnvelope = response.into_json()?;
                tracing::debug!("{file_name} [{locale}] progress {}", status.data.progress);
                Ok(in_translation(&status.data.progress))
            }
            Err(ureq::Error::Status(code, _)) if code == 400 || code == 404 => {
                tracing::debug!("no translation status for {file_name} [{locale}] (HTTP {code})");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl Connection for OneSkyClient {
    type Error = OneSkyError;

    fn export(&self, project_id: &ProjectId, locale: &Locale) -> Result<String, OneSkyError> {
        let auth = AuthParams::now(&self.credentials);
        let request = self
            .agent
            .get(&self.url(project_id, "translations/app-descriptions"))
            .query("locale", locale.as_str());

        let response = auth.apply(request).call()?;
        tracing::debug!("export {locale}: HTTP {}", response.status());
        Ok(response.into_string()?)
    }

    fn submit(&self, submission: &Submission<'_>) -> Result<SubmitOutcome, OneSkyError> {
        if submission.skip_if_in_translation
            && self.is_in_translation(
                submission.project_id,
                submission.file_name,
                submission.locale,
            )?
        {
            tracing::warn!(
                "{} [{}] is in translation, skipping upload",
                submission.file_name,
                submission.locale
            );
            return Ok(SubmitOutcome::SkippedInTranslation);
        }

        let auth = AuthParams::now(&self.credentials);
        let (content_type, body) = Form::new()
            .text("api_key", auth.api_key.as_str())
            .text("timestamp", auth.timestamp.as_str())
            .text("dev_hash", auth.dev_hash.as_str())
            .text("file_format", submission.format.as_str())
            .text("locale", submission.locale.as_str())
            .text(
                "is_keeping_all_strings",
                (!submission.deprecate_missing).to_string(),
            )
            .file(
                "file",
                submission.file_name,
                "application/json",
                submission.content.as_bytes(),
            )
            .finish();

        let response = self
            .agent
            .post(&self.url(submission.project_id, "files"))
            .set("Content-Type", &content_type)
            .send_bytes(&body)?;
        tracing::info!(
            "uploaded {} [{}]: HTTP {}",
            submission.file_name,
            submission.locale,
            response.status()
        );
        Ok(SubmitOutcome::Submitted)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
