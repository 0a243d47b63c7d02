//! Email content rendering — one plain-text template per notification kind.
//!
//! Pure functions of the canonical notification; no clock, no config, no
//! hidden state.

use crate::event::notification::{Approval, Notification, PipelineState, StackState};

/// Subject line for a notification.
///
/// Approval subjects pass through from the transport; the rest are
/// synthesized.
pub fn subject(notification: &Notification) -> String {
    match notification {
        Notification::Approval(a) => a.subject.clone(),
        Notification::PipelineState(s) => {
            format!("[ALERT] CodePipeline {} {}", s.pipeline, s.state)
        }
        Notification::StackState(s) => format!("[ALERT] {} - {}", s.event_type, s.status),
    }
}

/// Plain-text body for a notification.
pub fn body(notification: &Notification) -> String {
    match notification {
        Notification::Approval(a) => approval_body(a),
        Notification::PipelineState(s) => pipeline_state_body(s),
        Notification::StackState(s) => stack_state_body(s),
    }
}

fn approval_body(a: &Approval) -> String {
    let mut body = format!(
        "Hello,\n\n\
         The following Approval action is waiting for your response:\n\n\
         --Pipeline Details--\n\n\
         Pipeline: {pipeline}\n\
         Time: {time}\n\n\
         --Approval Details--\n\n",
        pipeline = a.pipeline,
        time = a.time.to_rfc3339(),
    );
    if let Some(message) = &a.custom_message {
        body.push_str(&format!("Approval details: {message}\n"));
    }
    body.push_str(&format!("Approval review link: {}\n", a.review_link));
    body.push_str(&format!(
        "Deadline: This review request will expire on {}\n",
        a.expires
    ));
    body.push_str(&format!(
        "\nView: {}",
        pipeline_console_link(&a.region, &a.pipeline)
    ));
    body
}

fn pipeline_state_body(s: &PipelineState) -> String {
    let mut body = format!(
        "🚨 Pipeline {state}!\n\n\
         --Pipeline Details--\n\n\
         Pipeline: {pipeline}\n\
         State: {state}\n\
         Time: {time}\n",
        state = s.state,
        pipeline = s.pipeline,
        time = s.time.to_rfc3339(),
    );
    if let Some(info) = &s.additional_information {
        body.push_str(&format!("Additional Information: {info}\n"));
    }
    if let Some(stage) = &s.failed_stage {
        body.push_str(&format!("Failed Stage: {stage}\n"));
    }
    body.push_str(&format!(
        "\nView: {}",
        pipeline_console_link(&s.region, &s.pipeline)
    ));
    body
}

fn stack_state_body(s: &StackState) -> String {
    format!(
        "🚨 Stack {status}!\n\n\
         --Stack Details--\n\n\
         Stack: {stack}\n\
         Status: {status}\n\
         Time: {time}\n\n\
         View: {link}",
        status = s.status,
        stack = s.stack_id,
        time = s.timestamp.to_rfc3339(),
        link = stack_console_link(&s.region, &s.stack_id),
    )
}

/// Deep link to the pipeline view in the CodePipeline console.
fn pipeline_console_link(region: &str, pipeline: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/codesuite/codepipeline/pipelines/{pipeline}/view?region={region}"
    )
}

/// Deep link to the stack view in the CloudFormation console.
fn stack_console_link(region: &str, stack_id: &str) -> String {
    format!(
        "https://{region}.console.aws.amazon.com/cloudformation/home?region={region}#/stacks/stackinfo?stackId={stack_id}"
    )
}
