//! Renders the linker script from the configured memory layout and puts it on the linker search
//! path. Bare-metal binaries of this package are linked with it directly.

use std::{env, fs, path};

use link_layout::{MemoryLayout, ENV_VARS, SCRIPT_NAME};

fn main() {
    for var in ENV_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }
    println!("cargo:rerun-if-changed=build.rs");

    let layout = match MemoryLayout::from_env() {
        Ok(layout) => layout,
        Err(err) => panic!("invalid memory layout configuration: {err}"),
    };
    let script = match layout.render() {
        Ok(script) => script,
        Err(err) => panic!("memory layout rejected: {err}"),
    };

    let out = path::PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join(SCRIPT_NAME), script).expect("failed to write linker script");
    println!("cargo:rustc-link-search={}", out.display());

    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        println!("cargo:rustc-link-arg-bins=-T{SCRIPT_NAME}");
    }
}
