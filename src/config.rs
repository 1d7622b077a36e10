//! Configuration for the simulator and the assembler.
//!
//! Every behavior where the historical program and real W65C02S silicon
//! disagree is a policy here, with the historical behavior as the default:
//!
//! 1. **Compare:** signed (historical) or unsigned (hardware) CMP/CPX/CPY.
//! 2. **Overflow:** same-sign heuristic (historical) or two's-complement V flag.
//! 3. **Labels:** byte-offset addresses or post-filter line indices.
//! 4. **Errors:** halt assembly on the first bad line, or skip it with a warning.
//!
//! Configuration is normally built in code with `EmulatorConfig::default()`,
//! or supplied as JSON via [`EmulatorConfig::from_json`].

use serde::Deserialize;
use thiserror::Error;

/// How CMP, CPX and CPY order their operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CompareMode {
    /// Both bytes are read as two's-complement `i8` values.
    ///
    /// `CMP #$80` with A = 0x01 sets carry, because 1 >= -128. N is bit 7
    /// of the register, not of the difference.
    #[default]
    Signed,
    /// Both bytes are read as `u8`, as the processor does.
    Unsigned,
}

/// How ADC and SBC compute the overflow flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum OverflowMode {
    /// V is set when both inputs are strictly positive and the signed result
    /// is negative, or both are strictly negative and the result is positive.
    ///
    /// Zero counts as neither sign, so `0x80 + 0x80` leaves V clear.
    #[default]
    SignHeuristic,
    /// V is the carry into bit 7 xor the carry out of bit 7.
    #[serde(alias = "Hardware")]
    TwosComplement,
}

/// What a label's value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LabelAddressing {
    /// Byte address of the next instruction, computed by a sizing pass.
    #[default]
    ByteOffset,
    /// Index of the label line among the non-blank, comment-stripped lines.
    LineIndex,
}

/// What the assembler does with a line it cannot encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ErrorPolicy {
    /// Report every failing line and produce no output.
    #[default]
    Halt,
    /// Drop failing lines, recording each as a warning.
    Skip,
}

/// Execution engine settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct CpuConfig {
    /// Compare instruction ordering.
    #[serde(default)]
    pub compare: CompareMode,

    /// Overflow flag rule for ADC/SBC.
    #[serde(default)]
    pub overflow: OverflowMode,

    /// Upper bound on instructions per run. `None` runs until halt or end of program.
    #[serde(default)]
    pub max_steps: Option<u64>,
}

impl CpuConfig {
    /// Configuration matching the W65C02S datasheet instead of the historical defaults.
    pub fn hardware() -> Self {
        Self {
            compare: CompareMode::Unsigned,
            overflow: OverflowMode::TwosComplement,
            max_steps: None,
        }
    }
}

/// Assembler settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct AssemblerConfig {
    /// Label value policy.
    #[serde(default)]
    pub labels: LabelAddressing,

    /// Behavior on a line that fails to assemble.
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

/// Top-level configuration.
///
/// # Example
///
/// ```
/// use w65c02s::config::{CompareMode, EmulatorConfig, ErrorPolicy, LabelAddressing};
///
/// let json = r#"{
///     "cpu": { "compare": "Unsigned", "max_steps": 10000 },
///     "assembler": { "labels": "LineIndex", "on_error": "Skip" }
/// }"#;
///
/// let config = EmulatorConfig::from_json(json).unwrap();
/// assert_eq!(config.cpu.compare, CompareMode::Unsigned);
/// assert_eq!(config.cpu.max_steps, Some(10000));
/// assert_eq!(config.assembler.labels, LabelAddressing::LineIndex);
/// assert_eq!(config.assembler.on_error, ErrorPolicy::Skip);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct EmulatorConfig {
    /// Execution engine settings
    #[serde(default)]
    pub cpu: CpuConfig,
    /// Assembler settings
    #[serde(default)]
    pub assembler: AssemblerConfig,
}

/// Failure to load a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the schema.
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmulatorConfig {
    /// Parses a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_historical_behavior() {
        let config = EmulatorConfig::default();
        assert_eq!(config.cpu.compare, CompareMode::Signed);
        assert_eq!(config.cpu.overflow, OverflowMode::SignHeuristic);
        assert_eq!(config.cpu.max_steps, None);
        assert_eq!(config.assembler.labels, LabelAddressing::ByteOffset);
        assert_eq!(config.assembler.on_error, ErrorPolicy::Halt);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = EmulatorConfig::from_json("{}").unwrap();
        assert_eq!(config, EmulatorConfig::default());
    }

    #[test]
    fn test_partial_document() {
        let json = r#"{"cpu": {"overflow": "TwosComplement"}}"#;
        let config = EmulatorConfig::from_json(json).unwrap();
        assert_eq!(config.cpu.overflow, OverflowMode::TwosComplement);
        assert_eq!(config.cpu.compare, CompareMode::Signed);
        assert_eq!(config.assembler, AssemblerConfig::default());
    }

    #[test]
    fn test_hardware_preset() {
        let cpu = CpuConfig::hardware();
        assert_eq!(cpu.compare, CompareMode::Unsigned);
        assert_eq!(cpu.overflow, OverflowMode::TwosComplement);
    }

    #[test]
    fn test_rejects_unknown_variant() {
        let err = EmulatorConfig::from_json(r#"{"cpu": {"compare": "Sideways"}}"#).unwrap_err();
        assert!(err.to_string().starts_with("invalid configuration"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EmulatorConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
