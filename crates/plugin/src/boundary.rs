//! The invocation boundary.
//!
//! Every tool call the host makes passes through [`guarded`].  Whatever the
//! handler does (returns a fault, panics, or gets cancelled by the host) the
//! resulting stream yields exactly one [`OutcomeMessage`] and then ends.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;

use ab_domain::fault::Fault;
use ab_domain::outcome::OutcomeMessage;
use ab_domain::stream::OutcomeStream;
use ab_domain::trace::TraceEvent;

use crate::types::{ToolContext, ToolResult};

/// Wrap a tool future into a one-shot lazy stream.
///
/// Nothing runs until the stream is first polled.
pub fn guarded<F>(ctx: ToolContext, fut: F) -> OutcomeStream
where
    F: Future<Output = ToolResult> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        yield run_guarded(ctx, fut).await;
    })
}

/// Drive `fut` to a single outcome message.
pub async fn run_guarded<F>(ctx: ToolContext, fut: F) -> OutcomeMessage
where
    F: Future<Output = ToolResult> + Send,
{
    TraceEvent::ToolInvoked {
        tool: ctx.tool_name.clone(),
        request_id: ctx.request_id.clone(),
    }
    .emit();

    // catch_unwind: a panicking handler still produces a message.
    let caught = AssertUnwindSafe(fut).catch_unwind();

    let result = tokio::select! {
        biased;
        _ = ctx.cancel.cancelled() => Err(Fault::System {
            type_name: "Cancelled".into(),
            message: "invocation was cancelled by the host before the request completed".into(),
        }),
        res = caught => match res {
            Ok(result) => result,
            Err(payload) => {
                tracing::error!(
                    tool = %ctx.tool_name,
                    request_id = %ctx.request_id,
                    "tool handler panicked"
                );
                Err(panic_fault(payload))
            }
        },
    };

    match result {
        Ok(outcome) => outcome,
        Err(fault) => {
            TraceEvent::FaultNormalized {
                tool: ctx.tool_name.clone(),
                request_id: ctx.request_id.clone(),
                fault: fault.kind().to_owned(),
            }
            .emit();
            fault.into_outcome()
        }
    }
}

/// Describe a panic payload.  `panic!` produces `&str` or `String`;
/// `panic_any` with a [`SystemSignal`] keeps its own name.
fn panic_fault(payload: Box<dyn Any + Send>) -> Fault {
    let (type_name, message) = if let Some(sig) = payload.downcast_ref::<SystemSignal>() {
        (sig.name.clone(), sig.message.clone())
    } else if let Some(s) = payload.downcast_ref::<&'static str>() {
        ("panic".to_owned(), (*s).to_owned())
    } else if let Some(s) = payload.downcast_ref::<String>() {
        ("panic".to_owned(), s.clone())
    } else {
        ("panic".to_owned(), "handler panicked with a non-string payload".to_owned())
    };
    Fault::System { type_name, message }
}

/// A named signal raised with [`std::panic::panic_any`] by code that needs
/// to abort an invocation from deep inside a call stack (a watchdog, a
/// host-side scheduler hook).  The boundary reports it by name.
#[derive(Debug, Clone)]
pub struct SystemSignal {
    pub name: String,
    pub message: String,
}

impl SystemSignal {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}
