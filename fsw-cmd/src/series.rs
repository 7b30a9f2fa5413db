//! Print the monitored series catalog.

use fsw_fred::series::SeriesDescriptor;

pub fn run_series() -> anyhow::Result<()> {
    let catalog = SeriesDescriptor::get_series_vector();
    println!("{:<18} {:>9}  {}", "SERIES_ID", "THRESHOLD", "NAME");
    for descriptor in &catalog {
        println!(
            "{:<18} {:>9}  {}",
            descriptor.series_id, descriptor.default_threshold, descriptor.display_name
        );
    }
    Ok(())
}
