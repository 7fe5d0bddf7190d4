fn main() {
    // ESP-IDF build metadata is only emitted when building for the device;
    // host builds (tests, CI) skip it entirely.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
