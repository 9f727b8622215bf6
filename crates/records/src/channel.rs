//! Channel (register suffix) configuration for interval data.

use chrono::NaiveDate;

/// Metadata identifying one metering-point channel, used to build `200`
/// channel header records.
///
/// The mandatory fields identify the datastream; the optional fields are
/// carried through to the header as empty columns when unset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelConfig {
    nmi: String,
    configuration: String,
    suffix: String,
    uom: String,
    register_id: Option<String>,
    datastream_id: Option<String>,
    serial_number: Option<String>,
    next_scheduled_read: Option<NaiveDate>,
}

impl ChannelConfig {
    /// Creates a channel configuration from the mandatory identity fields.
    pub fn new(
        nmi: impl Into<String>,
        configuration: impl Into<String>,
        suffix: impl Into<String>,
        uom: impl Into<String>,
    ) -> Self {
        Self {
            nmi: nmi.into(),
            configuration: configuration.into(),
            suffix: suffix.into(),
            uom: uom.into(),
            register_id: None,
            datastream_id: None,
            serial_number: None,
            next_scheduled_read: None,
        }
    }

    /// Sets the register identifier.
    pub fn with_register_id(mut self, id: impl Into<String>) -> Self {
        self.register_id = Some(id.into());
        self
    }

    /// Sets the MDM datastream identifier.
    pub fn with_datastream_id(mut self, id: impl Into<String>) -> Self {
        self.datastream_id = Some(id.into());
        self
    }

    /// Sets the meter serial number.
    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    /// Sets the next scheduled read date.
    pub fn with_next_scheduled_read(mut self, date: NaiveDate) -> Self {
        self.next_scheduled_read = Some(date);
        self
    }

    /// Returns the metering point identifier (NMI).
    pub fn nmi(&self) -> &str {
        &self.nmi
    }

    /// Returns the NMI configuration string (concatenated suffixes).
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Returns the channel/register suffix (e.g. `"E1"`).
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Returns the unit of measure (e.g. `"kWh"`).
    pub fn uom(&self) -> &str {
        &self.uom
    }

    /// Returns the register identifier, if set.
    pub fn register_id(&self) -> Option<&str> {
        self.register_id.as_deref()
    }

    /// Returns the MDM datastream identifier, if set.
    pub fn datastream_id(&self) -> Option<&str> {
        self.datastream_id.as_deref()
    }

    /// Returns the meter serial number, if set.
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    /// Returns the next scheduled read date, if set.
    pub fn next_scheduled_read(&self) -> Option<NaiveDate> {
        self.next_scheduled_read
    }
}

/// Returns the conventional unit of measure for a register suffix.
///
/// Energy suffixes map to `"kWh"`; anything else maps to an empty string
/// and should be supplied explicitly by the caller.
pub fn default_uom(suffix: &str) -> &'static str {
    match suffix {
        "E1" | "E2" | "B1" => "kWh",
        _ => "",
    }
}
