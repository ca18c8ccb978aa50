fn main() {
    if let Err(err) = vm_intel_merge::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
