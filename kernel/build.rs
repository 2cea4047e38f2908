use std::env;
use std::path::Path;

fn main() {
	println!("cargo:rerun-if-changed=linker.ld");

	// The hosted simulator links like any other program.
	if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("none") {
		return;
	}

	let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| String::from("."));
	let script = Path::new(&manifest_dir).join("linker.ld");
	println!("cargo:rustc-link-arg-bins=-T{}", script.display());
}
