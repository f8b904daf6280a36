//! GPU Debug Channel
//!
//! Validation and device errors raised outside an error scope arrive here as
//! structured records and are forwarded to the `log` facade. Formatting is
//! the logger's concern; this module only classifies.
//!
//! Runtime policy is log-and-continue: an uncaptured validation message does
//! not stop the frame. Construction-time failures (shader compiles, context
//! creation) are surfaced as `Result`s instead and never reach this channel.

/// Severity of a GPU debug message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A structured GPU debug record.
#[derive(Debug, Clone)]
pub struct GpuMessage {
    pub severity: Severity,
    /// Which part of the API produced the message.
    pub source: &'static str,
    pub message: String,
}

impl GpuMessage {
    fn from_wgpu(error: &wgpu::Error) -> Self {
        match error {
            wgpu::Error::OutOfMemory { .. } => Self {
                severity: Severity::Error,
                source: "out-of-memory",
                message: error.to_string(),
            },
            wgpu::Error::Validation { description, .. } => Self {
                severity: Severity::Error,
                source: "validation",
                message: description.clone(),
            },
            wgpu::Error::Internal { description, .. } => Self {
                severity: Severity::Warning,
                source: "internal",
                message: description.clone(),
            },
        }
    }

    /// Hands the record to the logger.
    pub fn emit(&self) {
        match self.severity {
            Severity::Error => {
                log::error!(target: "glint::gpu", "[{}] {}", self.source, self.message);
            }
            Severity::Warning => {
                log::warn!(target: "glint::gpu", "[{}] {}", self.source, self.message);
            }
        }
    }
}

/// Routes uncaptured device errors through [`GpuMessage`].
///
/// Installed once per device during context creation.
pub fn install_error_hook(device: &wgpu::Device) {
    device.on_uncaptured_error(Box::new(|error| {
        GpuMessage::from_wgpu(&error).emit();
    }));
}
