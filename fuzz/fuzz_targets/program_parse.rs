#![no_main]

use libfuzzer_sys::fuzz_target;
use solgen::Program;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = str::from_utf8(data) {
        if let Ok(program) = Program::parse(s).into_result() {
            for unit in &program.units {
                unit.imports().count();
                unit.contracts().count();
            }
        }
    }
});
