//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text to the assembler under every label and error policy.
//! Whatever assembles must also run identically through ROM dispatch and the
//! interpreter.

#![no_main]

use libfuzzer_sys::fuzz_target;
use w65c02s::config::{AssemblerConfig, CpuConfig, ErrorPolicy, LabelAddressing};
use w65c02s::{assemble_with_config, FlatMemory, Interpreter, CPU};

const STEP_LIMIT: u64 = 10_000;

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    for labels in [LabelAddressing::ByteOffset, LabelAddressing::LineIndex] {
        for on_error in [ErrorPolicy::Halt, ErrorPolicy::Skip] {
            let config = AssemblerConfig { labels, on_error };
            let Ok(output) = assemble_with_config(&source, &config) else {
                continue;
            };

            let cpu_config = CpuConfig {
                max_steps: Some(STEP_LIMIT),
                ..CpuConfig::default()
            };

            let mut rom = CPU::with_config(FlatMemory::new(), cpu_config);
            let rom_result = rom.execute_from_rom(&output.bytes);

            let mut interpreted = CPU::with_config(FlatMemory::new(), cpu_config);
            let interpreted_result = Interpreter::from_output(&output).run(&mut interpreted);

            // A branch into the middle of an instruction only fails the interpreter
            if let (Ok(_), Ok(_)) = (&rom_result, &interpreted_result) {
                assert_eq!(rom.a(), interpreted.a());
                assert_eq!(rom.x(), interpreted.x());
                assert_eq!(rom.y(), interpreted.y());
                assert_eq!(rom.status(), interpreted.status());
                assert_eq!(rom.pc(), interpreted.pc());
            }
        }
    }
});
