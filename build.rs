fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (tests, simulation) never touch the ESP-IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
