pub fn run(log_file: &str) {
    let samples = super::load_or_exit(log_file);
    let (epoch_start, epoch_end) = samples.epoch_range();
    let dropped = samples.dropped();

    println!("Log:            {log_file}");
    println!("Valid samples:  {}", samples.len());
    println!("Epoch range:    {epoch_start}..{epoch_end}");
    println!("Bit length:     {}", beaconrand_core::SEED_BITS);
    println!(
        "Dropped:        {} ({} parse, {} validation, {} duplicate epochs)",
        dropped.total(),
        dropped.parse_errors,
        dropped.validation_errors,
        dropped.duplicate_epochs
    );

    if dropped.total() > 0 {
        println!("\nRun with RUST_LOG=warn to see which lines were dropped.");
    }
}
