use std::env;

const DEFAULT_CPU_FREQ_HZ: &str = "8000000";

fn numeric_env(name: &str, default: &str) -> String {
    println!("cargo:rerun-if-env-changed={}", name);
    match env::var(name) {
        Ok(value) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => value,
        Ok(value) => {
            println!(
                "cargo:warning={}={:?} is not a decimal number, using {}",
                name, value, default
            );
            default.to_string()
        }
        Err(_) => default.to_string(),
    }
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Clock, parsed by src/config.rs
    let freq = numeric_env("BM_CPU_FREQ_HZ", DEFAULT_CPU_FREQ_HZ);
    println!("cargo:rustc-env=BM_CPU_FREQ_HZ={}", freq);

    // Optional busy-wait override, read with option_env! so an unset value
    // falls back to the count derived from the clock
    println!("cargo:rerun-if-env-changed=BM_LOOPS_PER_TICK");
    let loops = match env::var("BM_LOOPS_PER_TICK") {
        Ok(value) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => value,
        Ok(value) => panic!("BM_LOOPS_PER_TICK={:?} is not a decimal number", value),
        Err(_) => String::from("derived"),
    };

    // Host builds only exist for the unit tests
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!(
            "cargo:warning=Building for ATtiny85 at {} Hz, {} loops per tick",
            freq, loops
        );
    }
}
