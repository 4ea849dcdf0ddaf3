fn main() {
    // Device builds need the ESP-IDF sysenv exported for linking; host
    // builds have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
