//! Classification of raw envelopes into canonical notifications.
//!
//! Decode runs in two steps: a loose first pass pulls the discriminators
//! (the `approval` field, then the `source` string), then the selected
//! variant's payload is decoded into a typed struct that makes its required
//! fields mandatory. Unknown event shapes are a no-op, not an error.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::EventError;
use crate::event::envelope::SnsEntity;
use crate::event::notification::{Approval, Notification, PipelineState, StackState};

/// `source` value on pipeline execution and action state changes.
const SOURCE_CODEPIPELINE: &str = "aws.codepipeline";
/// `source` value on stack status changes.
const SOURCE_CLOUDFORMATION: &str = "aws.cloudformation";

/// The one pipeline state that carries failure details in
/// `additionalAttributes`.
const STATE_FAILED: &str = "FAILED";

/// Loose first-pass decode: just enough structure to classify.
#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    approval: Option<Value>,
    #[serde(default)]
    source: Option<String>,
    #[serde(rename = "detail-type", default)]
    detail_type: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    detail: Option<Value>,
    #[serde(rename = "additionalAttributes", default)]
    additional_attributes: Option<Value>,
    #[serde(default)]
    time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct ApprovalDetail {
    #[serde(rename = "pipelineName")]
    pipeline_name: String,
    expires: String,
    #[serde(rename = "approvalReviewLink")]
    approval_review_link: String,
    #[serde(rename = "customData", default)]
    custom_data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PipelineDetail {
    pipeline: String,
    state: String,
}

#[derive(Debug, Deserialize)]
struct FailureAttributes {
    #[serde(rename = "failedActions", default)]
    failed_actions: Vec<FailedAction>,
    #[serde(rename = "failedStage")]
    failed_stage: String,
}

#[derive(Debug, Deserialize)]
struct FailedAction {
    #[serde(rename = "additionalInformation")]
    additional_information: String,
}

#[derive(Debug, Deserialize)]
struct StackDetail {
    #[serde(rename = "stack-id")]
    stack_id: String,
    #[serde(rename = "status-details")]
    status_details: StatusDetails,
}

#[derive(Debug, Deserialize)]
struct StatusDetails {
    status: String,
}

/// Map one SNS record onto a canonical notification.
///
/// Returns `Ok(None)` for event types the relay does not handle. A payload
/// that fails to decode for a *recognized* type is an error.
pub fn normalize(entity: &SnsEntity) -> Result<Option<Notification>, EventError> {
    let mut raw: RawMessage = serde_json::from_str(&entity.message)?;

    // Approval wins over everything else present in the message.
    if let Some(value) = raw.approval.take() {
        return approval_notification(entity, value, raw).map(Some);
    }

    match raw.source.as_deref() {
        Some(SOURCE_CODEPIPELINE) => pipeline_notification(entity, raw).map(Some),
        Some(SOURCE_CLOUDFORMATION) => stack_notification(raw).map(Some),
        _ => Ok(None),
    }
}

fn approval_notification(
    entity: &SnsEntity,
    value: Value,
    raw: RawMessage,
) -> Result<Notification, EventError> {
    let detail: ApprovalDetail = decode_variant("approval", value)?;
    let subject = entity
        .subject
        .clone()
        .ok_or(EventError::MissingField("Subject"))?;

    Ok(Notification::Approval(Approval {
        pipeline: detail.pipeline_name,
        expires: detail.expires,
        review_link: detail.approval_review_link,
        custom_message: detail.custom_data,
        region: require_region(raw.region)?,
        time: entity.timestamp,
        subject,
    }))
}

fn pipeline_notification(entity: &SnsEntity, raw: RawMessage) -> Result<Notification, EventError> {
    let detail: PipelineDetail = decode_variant(
        "pipeline state",
        raw.detail.ok_or(EventError::MissingField("detail"))?,
    )?;

    let (additional_information, failed_stage) = if detail.state == STATE_FAILED {
        let attributes: FailureAttributes = decode_variant(
            "failure attributes",
            raw.additional_attributes
                .ok_or(EventError::MissingField("additionalAttributes"))?,
        )?;
        let action = attributes
            .failed_actions
            .into_iter()
            .next()
            .ok_or(EventError::MissingField("additionalAttributes.failedActions"))?;
        (
            Some(action.additional_information),
            Some(attributes.failed_stage),
        )
    } else {
        (None, None)
    };

    Ok(Notification::PipelineState(PipelineState {
        pipeline: detail.pipeline,
        state: detail.state,
        time: entity.timestamp,
        region: require_region(raw.region)?,
        additional_information,
        failed_stage,
    }))
}

fn stack_notification(raw: RawMessage) -> Result<Notification, EventError> {
    let detail: StackDetail = decode_variant(
        "stack state",
        raw.detail.ok_or(EventError::MissingField("detail"))?,
    )?;

    Ok(Notification::StackState(StackState {
        stack_id: detail.stack_id,
        status: detail.status_details.status,
        timestamp: raw.time.ok_or(EventError::MissingField("time"))?,
        region: require_region(raw.region)?,
        event_type: raw.detail_type.ok_or(EventError::MissingField("detail-type"))?,
    }))
}

fn require_region(region: Option<String>) -> Result<String, EventError> {
    region.ok_or(EventError::MissingField("region"))
}

fn decode_variant<T: serde::de::DeserializeOwned>(
    variant: &'static str,
    value: Value,
) -> Result<T, EventError> {
    serde_json::from_value(value).map_err(|e| EventError::MalformedPayload {
        variant,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(message: &Value, subject: Option<&str>) -> SnsEntity {
        SnsEntity {
            message: message.to_string(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
            subject: subject.map(String::from),
        }
    }

    fn approval_message() -> Value {
        json!({
            "region": "ap-northeast-1",
            "approval": {
                "pipelineName": "Demo",
                "expires": "2024-05-08T12:00:00Z",
                "approvalReviewLink": "https://console.aws.amazon.com/codesuite/codepipeline/pipelines/Demo/view",
                "customData": "Please review the staging deploy"
            }
        })
    }

    #[test]
    fn approval_field_always_wins_classification() {
        // Even with a pipeline-state `source`/`detail` alongside.
        let mut message = approval_message();
        message["source"] = json!("aws.codepipeline");
        message["detail"] = json!({"pipeline": "Demo", "state": "STARTED"});

        let result = normalize(&entity(&message, Some("APPROVAL NEEDED")))
            .unwrap()
            .unwrap();
        let Notification::Approval(approval) = result else {
            panic!("expected Approval, got {result:?}");
        };
        assert_eq!(approval.pipeline, "Demo");
        assert_eq!(approval.subject, "APPROVAL NEEDED");
        assert_eq!(
            approval.custom_message.as_deref(),
            Some("Please review the staging deploy")
        );
    }

    #[test]
    fn approval_without_transport_subject_is_malformed() {
        let err = normalize(&entity(&approval_message(), None)).unwrap_err();
        assert!(matches!(err, EventError::MissingField("Subject")));
    }

    #[test]
    fn approval_missing_required_fields_is_malformed() {
        let message = json!({
            "region": "ap-northeast-1",
            "approval": {"pipelineName": "Demo"}
        });
        let err = normalize(&entity(&message, Some("APPROVAL NEEDED"))).unwrap_err();
        assert!(matches!(
            err,
            EventError::MalformedPayload { variant: "approval", .. }
        ));
    }

    #[test]
    fn pipeline_state_maps_detail_fields() {
        let message = json!({
            "source": "aws.codepipeline",
            "region": "eu-west-1",
            "detail": {"pipeline": "Demo", "state": "SUCCEEDED"}
        });
        let result = normalize(&entity(&message, None)).unwrap().unwrap();
        let Notification::PipelineState(state) = result else {
            panic!("expected PipelineState, got {result:?}");
        };
        assert_eq!(state.pipeline, "Demo");
        assert_eq!(state.state, "SUCCEEDED");
        assert_eq!(state.region, "eu-west-1");
        assert!(state.additional_information.is_none());
        assert!(state.failed_stage.is_none());
    }

    #[test]
    fn failed_pipeline_extracts_failure_details() {
        let message = json!({
            "source": "aws.codepipeline",
            "region": "ap-northeast-1",
            "detail": {"pipeline": "Demo", "state": "FAILED"},
            "additionalAttributes": {
                "failedActions": [
                    {"additionalInformation": "boom"},
                    {"additionalInformation": "secondary"}
                ],
                "failedStage": "Build"
            }
        });
        let result = normalize(&entity(&message, None)).unwrap().unwrap();
        let Notification::PipelineState(state) = result else {
            panic!("expected PipelineState, got {result:?}");
        };
        assert_eq!(state.additional_information.as_deref(), Some("boom"));
        assert_eq!(state.failed_stage.as_deref(), Some("Build"));
    }

    #[test]
    fn failed_pipeline_without_attributes_is_malformed() {
        let message = json!({
            "source": "aws.codepipeline",
            "region": "ap-northeast-1",
            "detail": {"pipeline": "Demo", "state": "FAILED"}
        });
        let err = normalize(&entity(&message, None)).unwrap_err();
        assert!(matches!(
            err,
            EventError::MissingField("additionalAttributes")
        ));
    }

    #[test]
    fn failed_pipeline_with_empty_failed_actions_is_malformed() {
        let message = json!({
            "source": "aws.codepipeline",
            "region": "ap-northeast-1",
            "detail": {"pipeline": "Demo", "state": "FAILED"},
            "additionalAttributes": {"failedActions": [], "failedStage": "Build"}
        });
        let err = normalize(&entity(&message, None)).unwrap_err();
        assert!(matches!(
            err,
            EventError::MissingField("additionalAttributes.failedActions")
        ));
    }

    #[test]
    fn stack_status_change_maps_directly() {
        let message = json!({
            "source": "aws.cloudformation",
            "detail-type": "CloudFormation Stack Status Change",
            "region": "ap-northeast-1",
            "time": "2024-05-01T12:34:56Z",
            "detail": {
                "stack-id": "arn:aws:cloudformation:ap-northeast-1:123456789012:stack/demo/abc",
                "status-details": {"status": "UPDATE_COMPLETE"}
            }
        });
        let result = normalize(&entity(&message, None)).unwrap().unwrap();
        let Notification::StackState(stack) = result else {
            panic!("expected StackState, got {result:?}");
        };
        assert_eq!(
            stack.stack_id,
            "arn:aws:cloudformation:ap-northeast-1:123456789012:stack/demo/abc"
        );
        assert_eq!(stack.status, "UPDATE_COMPLETE");
        assert_eq!(stack.event_type, "CloudFormation Stack Status Change");
        assert_eq!(stack.timestamp.to_rfc3339(), "2024-05-01T12:34:56+00:00");
    }

    #[test]
    fn stack_without_region_is_malformed() {
        let message = json!({
            "source": "aws.cloudformation",
            "detail-type": "CloudFormation Stack Status Change",
            "time": "2024-05-01T12:34:56Z",
            "detail": {
                "stack-id": "arn:aws:cloudformation:ap-northeast-1:123456789012:stack/demo/abc",
                "status-details": {"status": "DELETE_FAILED"}
            }
        });
        let err = normalize(&entity(&message, None)).unwrap_err();
        assert!(matches!(err, EventError::MissingField("region")));
    }

    #[test]
    fn unknown_source_is_skipped() {
        let message = json!({
            "source": "aws.health",
            "detail": {"eventTypeCode": "AWS_ELASTICLOADBALANCING_API_ISSUE"}
        });
        assert!(normalize(&entity(&message, None)).unwrap().is_none());
    }

    #[test]
    fn message_without_discriminators_is_skipped() {
        let message = json!({"hello": "world"});
        assert!(normalize(&entity(&message, None)).unwrap().is_none());
    }

    #[test]
    fn non_json_message_is_an_error() {
        let entity = SnsEntity {
            message: "not json at all".to_string(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
            subject: None,
        };
        assert!(matches!(normalize(&entity), Err(EventError::Decode(_))));
    }

    #[test]
    fn json_scalar_message_is_an_error() {
        let entity = SnsEntity {
            message: "\"just a string\"".to_string(),
            timestamp: "2024-05-01T12:00:00Z".parse().unwrap(),
            subject: None,
        };
        assert!(matches!(normalize(&entity), Err(EventError::Decode(_))));
    }
}
