fn main() {
    println!("cargo:rerun-if-changed=config/botwave.json");

    // Host builds (tests, fuzzing) have no ESP-IDF toolchain to export.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
