//! Input reading type for interval (NEM12) data.

use chrono::NaiveDateTime;

/// One interval reading for a single metering-point channel.
///
/// `end` marks the instant at which the sampling interval finishes; a
/// reading ending at midnight therefore belongs to the prior calendar day.
/// Quality and event metadata are optional and default to absent, which
/// serializes as empty fields.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalRead {
    end: NaiveDateTime,
    value: f64,
    quality: Option<String>,
    event_code: Option<String>,
    event_desc: Option<String>,
}

impl IntervalRead {
    /// Creates a reading with no quality or event metadata.
    pub fn new(end: NaiveDateTime, value: f64) -> Self {
        Self {
            end,
            value,
            quality: None,
            event_code: None,
            event_desc: None,
        }
    }

    /// Sets the quality-method code (e.g. `"A"` for actual).
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Sets the event/reason code.
    pub fn with_event_code(mut self, code: impl Into<String>) -> Self {
        self.event_code = Some(code.into());
        self
    }

    /// Sets the event/reason description.
    pub fn with_event_desc(mut self, desc: impl Into<String>) -> Self {
        self.event_desc = Some(desc.into());
        self
    }

    /// Returns the interval-end timestamp.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns the reading value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the quality-method code, if set.
    pub fn quality(&self) -> Option<&str> {
        self.quality.as_deref()
    }

    /// Returns the event code, if set.
    pub fn event_code(&self) -> Option<&str> {
        self.event_code.as_deref()
    }

    /// Returns the event description, if set.
    pub fn event_desc(&self) -> Option<&str> {
        self.event_desc.as_deref()
    }
}
