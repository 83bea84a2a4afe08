fn main() {
    // Propagate the ESP-IDF link/cfg environment only when the espidf
    // feature is active; host builds need none of it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
