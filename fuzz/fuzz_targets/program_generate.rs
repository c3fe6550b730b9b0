#![no_main]

use libfuzzer_sys::fuzz_target;
use rand::prelude::*;
use solgen::generate_with;

#[path = "../../tests/test_helper.rs"]
mod test_helper;
use self::test_helper::*;

fuzz_target!(|data: &[u8]| {
    if let Ok(seed) = data.try_into() {
        let mut rng = StdRng::from_seed(seed);
        let config = generate_config(&mut rng, 16);
        let program = generate_with(rng.random(), &config).expect("grammar is well formed");
        check_program(&program, &config);
    }
});
