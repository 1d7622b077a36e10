//! W65C02S Assembler Module
//!
//! Converts assembly language source code into binary machine code that
//! [`CPU::execute_from_rom`](crate::CPU::execute_from_rom) runs unchanged.
//!
//! Assembly is two-pass:
//!
//! 1. **Layout**: every line is parsed, labels are recorded, and every
//!    instruction is sized by a provisional mode resolution in which each label
//!    reference stands in as `$0000` (`$00` for branch operands).
//! 2. **Encoding**: label references are replaced by their values (`$XXXX`, or
//!    for branches the byte offset `target - (address + 2)` as `$XX`), the
//!    addressing mode is resolved, and opcode plus operand bytes are emitted.
//!
//! # Syntax
//!
//! ```text
//! ; comment
//! start:              ; label on its own line
//!     LDX #$03
//! loop: DEX           ; label before an instruction
//!     BNE loop
//!     LDA ($20),Y
//! ```

pub mod encoder;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use crate::addressing::{self, AddressingMode};
use crate::config::{AssemblerConfig, ErrorPolicy, LabelAddressing};
use crate::number::parse_number;
use crate::opcodes::{supports, Mnemonic, UnknownMnemonic};
use parser::AssemblyLine;
use source_map::{SourceLocation, SourceMap};
use std::collections::{BTreeMap, HashSet};
use symbol_table::SymbolTable;
use tracing::{debug, warn};

/// Complete output from assembling source code
#[derive(Debug, Clone)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes, starting at address 0x0000
    pub bytes: Vec<u8>,

    /// Resolved instructions in program order
    pub instructions: Vec<AssembledInstruction>,

    /// Symbol table with all defined labels
    pub symbol_table: Vec<Symbol>,

    /// Source map for debugging
    pub source_map: SourceMap,

    /// Non-fatal warnings encountered during assembly
    pub warnings: Vec<AssemblerWarning>,
}

impl AssemblerOutput {
    /// Looks up a label's value.
    pub fn symbol(&self, name: &str) -> Option<u16> {
        self.symbol_table
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.address)
    }
}

/// One instruction after label substitution and mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembledInstruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,

    /// Raw operand as encoded (branch offsets are the offset byte)
    pub operand: Option<u16>,

    /// Address of the opcode byte
    pub address: u16,

    /// Encoded length in bytes
    pub size: u8,

    /// Source line (1-indexed)
    pub line: usize,
}

/// A symbol table entry mapping a label to an address
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Label name (case-sensitive)
    pub name: String,

    /// Resolved value for this label
    pub address: u16,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// A non-fatal warning from the assembler
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblerWarning {
    /// Line number where warning occurred
    pub line: usize,

    /// Warning message
    pub message: String,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct AssemblerError {
    /// Error type classification
    pub error_type: ErrorType,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// Column number where error starts (0-indexed)
    pub column: usize,

    /// Character span (start, end) in the source line
    pub span: (usize, usize),

    /// Human-readable error message
    pub message: String,
}

impl AssemblerError {
    fn at(line: &AssemblyLine, error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            line: line.line_number,
            column: line.span.0,
            span: line.span,
            message: message.into(),
        }
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Malformed numeric literal
    InvalidNumber,

    /// No addressing mode accepts the operand
    AddressingModeMismatch,

    /// The mnemonic has no opcode for the resolved addressing mode
    UnsupportedCombination,

    /// Invalid mnemonic (not a recognized instruction)
    InvalidMnemonic,

    /// Syntax error (unbalanced parentheses, stray text)
    SyntaxError,

    /// Undefined label reference
    UndefinedLabel,

    /// Duplicate label definition
    DuplicateLabel,

    /// Invalid label name (too long, starts with digit, register name)
    InvalidLabel,

    /// Value out of range (branch too far, program past 0xFFFF)
    RangeError,
}

/// Assemble source code into machine code with the default configuration.
///
/// # Examples
///
/// ```
/// use w65c02s::assemble;
///
/// let output = assemble("LDX #$03\nloop: DEX\nBNE loop\n").unwrap();
/// assert_eq!(output.bytes, vec![0xA2, 0x03, 0xCA, 0xD0, 0xFD]);
/// assert_eq!(output.symbol("loop"), Some(0x0002));
/// ```
pub fn assemble(source: &str) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    assemble_with_config(source, &AssemblerConfig::default())
}

/// Assemble source code with explicit label and error policies.
///
/// With [`ErrorPolicy::Halt`] every failing line is reported and no output is
/// produced. With [`ErrorPolicy::Skip`] failing lines are dropped and recorded
/// as warnings; layout is recomputed without them so labels stay accurate. A
/// label on a line whose instruction failed is kept and points at the next
/// instruction.
pub fn assemble_with_config(
    source: &str,
    config: &AssemblerConfig,
) -> Result<AssemblerOutput, Vec<AssemblerError>> {
    let lines = parser::parse_source(source);
    let mut skipped = HashSet::new();
    let mut stripped = HashSet::new();
    let mut warnings = Vec::new();

    loop {
        let mut pass = Pass::new(config, &lines, &skipped, &stripped);
        pass.layout();
        pass.encode();

        if pass.failures.is_empty() {
            return Ok(pass.finish(warnings));
        }

        let Pass {
            failures,
            label_failures,
            ..
        } = pass;

        match config.on_error {
            ErrorPolicy::Halt => return Err(failures.into_values().collect()),
            ErrorPolicy::Skip => {
                for (index, error) in failures {
                    let keeps_label = matches!(&lines[index], Ok(line) if line.label.is_some())
                        && !label_failures.contains(&index);

                    if keeps_label {
                        warn!(line = error.line, message = %error.message, "skipping instruction");
                        warnings.push(AssemblerWarning {
                            line: error.line,
                            message: format!("instruction skipped, label kept: {}", error.message),
                        });
                        stripped.insert(index);
                    } else {
                        warn!(line = error.line, message = %error.message, "skipping line");
                        warnings.push(AssemblerWarning {
                            line: error.line,
                            message: format!("line skipped: {}", error.message),
                        });
                        skipped.insert(index);
                    }
                }
            }
        }
    }
}

/// One layout + encoding attempt over the parsed lines.
struct Pass<'a> {
    config: &'a AssemblerConfig,
    lines: &'a [Result<AssemblyLine, AssemblerError>],
    skipped: &'a HashSet<usize>,
    /// Lines whose label stays but whose instruction is dropped
    stripped: &'a HashSet<usize>,
    symbols: SymbolTable,
    /// Address of each instruction line, by line index
    addresses: BTreeMap<usize, u16>,
    /// First error per line index
    failures: BTreeMap<usize, AssemblerError>,
    /// Lines whose label definition itself failed
    label_failures: HashSet<usize>,
    instructions: Vec<AssembledInstruction>,
}

impl<'a> Pass<'a> {
    fn new(
        config: &'a AssemblerConfig,
        lines: &'a [Result<AssemblyLine, AssemblerError>],
        skipped: &'a HashSet<usize>,
        stripped: &'a HashSet<usize>,
    ) -> Self {
        Self {
            config,
            lines,
            skipped,
            stripped,
            symbols: SymbolTable::new(),
            addresses: BTreeMap::new(),
            failures: BTreeMap::new(),
            label_failures: HashSet::new(),
            instructions: Vec::new(),
        }
    }

    fn active_lines(
        &self,
    ) -> impl Iterator<Item = (usize, &'a Result<AssemblyLine, AssemblerError>)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter(move |(index, _)| !self.skipped.contains(index))
    }

    /// Pass 1: record labels and assign every instruction an address.
    fn layout(&mut self) {
        let mut address: u32 = 0;
        let lines: Vec<_> = self.active_lines().collect();

        for (index, entry) in lines {
            let line = match entry {
                Ok(line) => line,
                Err(error) => {
                    self.failures.insert(index, error.clone());
                    continue;
                }
            };

            if let Some(name) = &line.label {
                let value = match self.config.labels {
                    LabelAddressing::ByteOffset => address,
                    LabelAddressing::LineIndex => index as u32,
                };

                if value > 0xFFFF {
                    let message = format!("label '{}' is past $FFFF", name);
                    self.label_failures.insert(index);
                    self.fail(index, AssemblerError::at(line, ErrorType::RangeError, message));
                    continue;
                }

                let added = self
                    .symbols
                    .add_symbol(name.clone(), value as u16, line.line_number);
                if let Err(existing) = added {
                    let message = format!(
                        "label '{}' already defined on line {}",
                        name, existing.defined_at
                    );
                    self.label_failures.insert(index);
                    self.fail(index, AssemblerError::at(line, ErrorType::DuplicateLabel, message));
                    continue;
                }

                debug!(label = %name, value, line = line.line_number, "label defined");
            }

            if line.mnemonic.is_none() || self.stripped.contains(&index) {
                continue;
            }

            if address > 0xFFFF {
                let message = "program extends past $FFFF";
                self.fail(index, AssemblerError::at(line, ErrorType::RangeError, message));
                continue;
            }

            self.addresses.insert(index, address as u16);

            // Lines that cannot be sized are reported by the encoding pass
            if let Ok(instruction) = self.resolve(line, address as u16, true) {
                address += instruction.size as u32;
                if address > 0x1_0000 {
                    let message = "instruction extends past $FFFF";
                    self.fail(index, AssemblerError::at(line, ErrorType::RangeError, message));
                }
            }
        }
    }

    /// Pass 2: substitute labels, resolve modes and collect instructions.
    fn encode(&mut self) {
        let lines: Vec<_> = self.active_lines().collect();

        for (index, entry) in lines {
            if self.failures.contains_key(&index) {
                continue;
            }
            let (Ok(line), Some(&address)) = (entry, self.addresses.get(&index)) else {
                continue;
            };

            match self.resolve(line, address, false) {
                Ok(instruction) => self.instructions.push(instruction),
                Err(error) => self.fail(index, error),
            }
        }
    }

    fn fail(&mut self, index: usize, error: AssemblerError) {
        self.failures.entry(index).or_insert(error);
    }

    /// Resolves one instruction line at `address`.
    ///
    /// `provisional` substitutes placeholders for labels so the line can be
    /// sized before the symbol table is complete.
    fn resolve(
        &self,
        line: &AssemblyLine,
        address: u16,
        provisional: bool,
    ) -> Result<AssembledInstruction, AssemblerError> {
        let text = line.mnemonic.as_deref().unwrap_or_default();
        let mnemonic: Mnemonic = text.parse().map_err(|e: UnknownMnemonic| {
            AssemblerError::at(line, ErrorType::InvalidMnemonic, e.to_string())
        })?;

        let field = parser::split_operands(line.operand.as_deref().unwrap_or_default())
            .map_err(|message| AssemblerError::at(line, ErrorType::SyntaxError, message))?;

        let mut tokens = Vec::with_capacity(field.tokens.len());
        for token in &field.tokens {
            let substituted = parser::substitute_identifiers(token, |ident| {
                self.label_text(line, mnemonic, ident, address, provisional)
            })?;
            tokens.push(substituted);
        }

        let token_refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let Some(resolution) = addressing::resolve(field.indirect, mnemonic, &token_refs) else {
            return Err(mismatch(line, mnemonic, &tokens));
        };

        if !supports(mnemonic, resolution.mode) {
            return Err(AssemblerError::at(
                line,
                ErrorType::UnsupportedCombination,
                format!("{} does not support {} addressing", mnemonic, resolution.mode),
            ));
        }

        Ok(AssembledInstruction {
            mnemonic,
            mode: resolution.mode,
            operand: resolution.operand,
            address,
            size: 1 + resolution.mode.operand_bytes(),
            line: line.line_number,
        })
    }

    /// Replacement text for an identifier inside an operand.
    fn label_text(
        &self,
        line: &AssemblyLine,
        mnemonic: Mnemonic,
        ident: &str,
        address: u16,
        provisional: bool,
    ) -> Result<Option<String>, AssemblerError> {
        if ["A", "X", "Y"].iter().any(|r| r.eq_ignore_ascii_case(ident)) {
            return Ok(None);
        }

        let relative = mnemonic.is_branch() && self.config.labels == LabelAddressing::ByteOffset;

        if provisional {
            let placeholder = if relative { "$00" } else { "$0000" };
            return Ok(Some(placeholder.to_string()));
        }

        let Some(symbol) = self.symbols.lookup_symbol(ident) else {
            return Err(AssemblerError::at(
                line,
                ErrorType::UndefinedLabel,
                format!("undefined label '{}'", ident),
            ));
        };

        if !relative {
            return Ok(Some(format!("${:04X}", symbol.address)));
        }

        let offset = symbol.address as i32 - (address as i32 + 2);
        if !(-128..=127).contains(&offset) {
            return Err(AssemblerError::at(
                line,
                ErrorType::RangeError,
                format!("branch to '{}' is {} bytes away (range is -128..127)", ident, offset),
            ));
        }

        Ok(Some(format!("${:02X}", offset as i8 as u8)))
    }

    fn finish(self, warnings: Vec<AssemblerWarning>) -> AssemblerOutput {
        let mut bytes = Vec::new();
        let mut source_map = SourceMap::new();

        for instruction in &self.instructions {
            // resolve() already checked the combination
            let encoded =
                encoder::encode(instruction.mnemonic, instruction.mode, instruction.operand);
            if let Some(encoded) = encoded {
                bytes.extend_from_slice(&encoded);
            }

            let (column, length) = self
                .lines
                .iter()
                .flatten()
                .find(|l| l.line_number == instruction.line)
                .map_or((0, 0), |l| (l.span.0, l.span.1 - l.span.0));
            source_map.add_mapping(
                instruction.address,
                instruction.size,
                SourceLocation {
                    line: instruction.line,
                    column,
                    length,
                },
            );
        }
        source_map.finalize();

        let symbol_table = self.symbols.into_symbols();
        debug!(
            bytes = bytes.len(),
            instructions = self.instructions.len(),
            labels = symbol_table.len(),
            warnings = warnings.len(),
            "assembly complete"
        );

        AssemblerOutput {
            bytes,
            instructions: self.instructions,
            symbol_table,
            source_map,
            warnings,
        }
    }
}

/// Error for operands no mode accepts, naming a bad literal when there is one.
fn mismatch(line: &AssemblyLine, mnemonic: Mnemonic, tokens: &[String]) -> AssemblerError {
    for token in tokens {
        let literal = token.trim_start_matches('#');
        let numeric =
            literal.starts_with(['$', '%']) || literal.starts_with(|c: char| c.is_ascii_digit());
        if numeric {
            if let Err(e) = parse_number(literal) {
                return AssemblerError::at(line, ErrorType::InvalidNumber, e.to_string());
            }
        }
    }

    AssemblerError::at(
        line,
        ErrorType::AddressingModeMismatch,
        format!(
            "no addressing mode of {} accepts operand '{}'",
            mnemonic,
            line.operand.as_deref().unwrap_or_default()
        ),
    )
}

/// Validate a label name
///
/// Labels must:
/// - Start with a letter [a-zA-Z]
/// - Contain only alphanumeric characters and underscores
/// - Not exceed 32 characters in length
/// - Not be a register name (`A`, `X`, `Y`)
pub(crate) fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("label name cannot be empty".to_string());
    };

    if name.len() > 32 {
        return Err(format!("label name too long (max 32 characters): {}", name));
    }

    if !first.is_ascii_alphabetic() {
        return Err(format!("label must start with a letter, not '{}'", first));
    }

    if let Some(ch) = chars.find(|&ch| !ch.is_ascii_alphanumeric() && ch != '_') {
        return Err(format!(
            "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
            ch
        ));
    }

    if ["A", "X", "Y"].iter().any(|r| r.eq_ignore_ascii_case(name)) {
        return Err(format!("'{}' is a register name", name));
    }

    Ok(())
}
