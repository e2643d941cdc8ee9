//! Puts `memory.x` where the linker can find it and adds the link scripts
//! needed by cortex-m-rt, embassy-rp and defmt.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    File::create(out.join("memory.x"))
        .unwrap()
        .write_all(include_bytes!("memory.x"))
        .unwrap();
    println!("cargo:rustc-link-search={}", out.display());

    println!("cargo:rerun-if-changed=memory.x");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    for key in [
        "GAUGE_TEST_PASS_THRESHOLD_MV",
        "GAUGE_TEST_BLINK_PERIOD_MS",
        "GAUGE_TEST_POLL_INTERVAL_MS",
    ] {
        println!("cargo:rerun-if-env-changed={key}");
    }
}
