//! Record formatting for sinks

use super::record::LogRecord;

/// Timestamp layout used by the detailed format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// How a sink renders a record into a line
///
/// Chosen once when a sink is created and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// Message text only, for user-facing progress output
    MessageOnly,
    /// `timestamp|LEVEL|pid|module@line:function message`
    Detailed,
}

impl RecordFormat {
    /// Render `record` without the trailing newline
    pub fn render(&self, record: &LogRecord) -> String {
        match self {
            RecordFormat::MessageOnly => record.message.clone(),
            RecordFormat::Detailed => format!(
                "{}|{}|{}|{}@{}:{} {}",
                record.timestamp.format(TIMESTAMP_FORMAT),
                record.severity.as_str(),
                record.process_id,
                record.callsite.module(),
                record.callsite.line(),
                record.callsite.function(),
                record.message
            ),
        }
    }

    /// Render `record` as a newline-terminated line
    pub fn render_line(&self, record: &LogRecord) -> String {
        let mut line = self.render(record);
        line.push('\n');
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::level::Severity;
    use crate::logging::record::Callsite;
    use chrono::{Local, TimeZone};

    fn sample_record() -> LogRecord {
        let mut record = LogRecord::new(
            "app",
            Severity::Warning,
            Callsite::new("src/sync/worker.rs", 87, "drain_queue"),
            "queue is backing up",
        );
        record.timestamp = Local.with_ymd_and_hms(2026, 1, 21, 14, 30, 45).unwrap();
        record.process_id = 4242;
        record
    }

    #[test]
    fn test_message_only_format() {
        let record = sample_record();
        assert_eq!(RecordFormat::MessageOnly.render(&record), "queue is backing up");
    }

    #[test]
    fn test_detailed_format_fields_in_order() {
        let record = sample_record();
        let line = RecordFormat::Detailed.render(&record);
        assert_eq!(
            line,
            "2026-01-21 14:30:45,000|WARNING|4242|worker@87:drain_queue queue is backing up"
        );

        let fields: Vec<&str> = line.splitn(4, '|').collect();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[1], "WARNING");
        assert_eq!(fields[2], "4242");
        assert!(fields[3].starts_with("worker@87:drain_queue "));
    }

    #[test]
    fn test_render_line_appends_newline() {
        let record = sample_record();
        assert!(RecordFormat::MessageOnly.render_line(&record).ends_with('\n'));
    }
}
