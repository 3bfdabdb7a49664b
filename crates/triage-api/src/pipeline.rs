//! Report pipeline: decode, upload, assemble, publish.
//!
//! A linear state machine with no back-edges. Any stage may fail; a failure
//! ends the run and is reported once at ERROR with the stage it happened in.
//! Attachments stored before a failure are not removed.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::multipart::{Multipart, MultipartRejection};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, error, field, info, info_span, Instrument, Span};
use triage_core::{
    assemble, logging, Attachment, Error, IssueResult, IssueTracker, Result, UploadedAsset,
};
use triage_storage::AttachmentUploader;

use crate::multipart;

/// Stage of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Received,
    Decoding,
    Uploading,
    Assembling,
    Publishing,
    Done,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Received => "received",
            PipelineStage::Decoding => "decoding",
            PipelineStage::Uploading => "uploading",
            PipelineStage::Assembling => "assembling",
            PipelineStage::Publishing => "publishing",
            PipelineStage::Done => "done",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns one multipart submission into one created issue.
///
/// Backends are injected so tests can substitute recording doubles.
#[derive(Clone)]
pub struct ReportPipeline {
    uploader: AttachmentUploader,
    tracker: Arc<dyn IssueTracker>,
    upload_concurrency: usize,
    request_timeout: Duration,
}

impl ReportPipeline {
    pub fn new(
        uploader: AttachmentUploader,
        tracker: Arc<dyn IssueTracker>,
        upload_concurrency: usize,
        request_timeout: Duration,
    ) -> Self {
        Self {
            uploader,
            tracker,
            upload_concurrency: upload_concurrency.max(1),
            request_timeout,
        }
    }

    /// Run the pipeline for a request body.
    ///
    /// An extractor rejection is treated as a decode failure. The whole run,
    /// body streaming included, is bounded by the request timeout; expiry
    /// fails with the error kind of the stage that was in progress.
    pub async fn run(
        &self,
        request_id: Option<&str>,
        multipart: std::result::Result<Multipart, MultipartRejection>,
    ) -> Result<IssueResult> {
        let span = info_span!(
            "report_pipeline",
            { logging::REQUEST_ID } = request_id.unwrap_or(""),
            { logging::SUBSYSTEM } = "api",
            { logging::COMPONENT } = "pipeline",
            { logging::STAGE } = field::Empty,
            { logging::ATTACHMENT_COUNT } = field::Empty,
            { logging::ISSUE_URL } = field::Empty
        );
        let started = Instant::now();
        let mut stage = PipelineStage::Received;

        let outcome = tokio::time::timeout(
            self.request_timeout,
            self.execute(multipart, &mut stage, &span)
                .instrument(span.clone()),
        )
        .await;
        let result = outcome.unwrap_or_else(|_| Err(timeout_error(stage, self.request_timeout)));

        let _enter = span.enter();
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(issue) => info!(
                { logging::SUCCESS } = true,
                { logging::DURATION_MS } = duration_ms,
                { logging::ISSUE_URL } = %issue.url,
                "Report filed"
            ),
            Err(e) => error!(
                { logging::SUCCESS } = false,
                { logging::STAGE } = stage.as_str(),
                { logging::ERROR_KIND } = e.kind(),
                { logging::ERROR_MSG } = %e,
                { logging::DURATION_MS } = duration_ms,
                "Report pipeline failed"
            ),
        }
        result
    }

    async fn execute(
        &self,
        multipart: std::result::Result<Multipart, MultipartRejection>,
        stage: &mut PipelineStage,
        span: &Span,
    ) -> Result<IssueResult> {
        advance(stage, PipelineStage::Decoding, span);
        let form = multipart::decode(multipart.map_err(multipart::rejection_error)?).await?;
        span.record(logging::ATTACHMENT_COUNT, form.attachments.len());

        advance(stage, PipelineStage::Uploading, span);
        let assets = self.upload_all(form.attachments).await?;

        advance(stage, PipelineStage::Assembling, span);
        let request = assemble(&form.fields, &assets);
        debug!(labels = ?request.labels, title = %request.title, "Issue assembled");

        advance(stage, PipelineStage::Publishing, span);
        let issue = self.tracker.create_issue(&request).await?;
        span.record(logging::ISSUE_URL, issue.url.as_str());

        advance(stage, PipelineStage::Done, span);
        Ok(issue)
    }

    /// Upload attachments, at most `upload_concurrency` at a time.
    ///
    /// The returned assets are in attachment arrival order whatever order
    /// the uploads complete in. The first failure in that order is returned.
    async fn upload_all(&self, attachments: Vec<Attachment>) -> Result<Vec<UploadedAsset>> {
        let uploader = &self.uploader;
        stream::iter(attachments.into_iter().enumerate())
            .map(|(index, attachment)| async move {
                debug!(
                    { logging::ATTACHMENT_INDEX } = index,
                    { logging::FILENAME } = %attachment.filename,
                    "Uploading attachment"
                );
                uploader.upload(attachment).await
            })
            .buffered(self.upload_concurrency)
            .try_collect()
            .await
    }

    /// Backend the issues are filed in, for startup logging.
    pub fn tracker_target(&self) -> String {
        self.tracker.target()
    }
}

/// Failure for a run that hit the request deadline during `stage`.
fn timeout_error(stage: PipelineStage, limit: Duration) -> Error {
    let message = format!("request timed out after {}s while {}", limit.as_secs(), stage);
    match stage {
        PipelineStage::Received | PipelineStage::Decoding => Error::Decode(message),
        PipelineStage::Uploading => Error::Upload(message),
        PipelineStage::Assembling | PipelineStage::Publishing | PipelineStage::Done => {
            Error::Publish(message)
        }
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage, span: &Span) {
    *stage = next;
    span.record(logging::STAGE, next.as_str());
    debug!({ logging::STAGE } = next.as_str(), "Pipeline stage");
}
