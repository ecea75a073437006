fn main() {
    // Propagate ESP-IDF build environment (no-op on host-target builds).
    embuild::espidf::sysenv::output();
}
