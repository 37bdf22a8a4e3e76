//! Bridge from `tracing` events into registered channels
//!
//! Install a [`ChannelLayer`] on a `tracing_subscriber` registry and any
//! event whose target equals a channel name is emitted through that channel:
//!
//! ```ignore
//! tracing::info!(target: "app", "synced {} files", count);
//! ```

use std::fmt::Write as FmtWrite;
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::emit::Emit;
use super::level::Severity;
use super::record::{Callsite, UNKNOWN_FUNCTION};
use super::registry::LoggerRegistry;

/// Target of this crate's own diagnostics; its modules log under `splitlog::`
const OWN_TARGET: &str = "splitlog";

fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(OWN_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

/// A tracing Layer that routes events to channels by target
///
/// `tracing` metadata carries no function name, so records routed through
/// this layer show `<unknown>` in the function field of detailed lines.
pub struct ChannelLayer {
    registry: Arc<LoggerRegistry>,
}

impl ChannelLayer {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for ChannelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        // Sink failures are reported through tracing; never feed them back
        if is_own_target(target) {
            return;
        }

        let Some(logger) = self.registry.get(target) else {
            return;
        };

        let severity = Severity::from(*metadata.level());
        if !logger.is_enabled_for(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let callsite = Callsite::new(
            metadata.file().unwrap_or(metadata.target()),
            metadata.line().unwrap_or(0),
            UNKNOWN_FUNCTION,
        );
        logger.emit(severity, callsite, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field, with other fields appended as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_string()
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(&mut self.message, "{:?}", value);
        } else {
            let _ = write!(&mut self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(&mut self.fields, " {}={}", field.name(), value);
        }
    }
}
