//! Fixed demonstration: build a sample train, compare seats, then save,
//! reload and report on it.

use anyhow::{Context, Result};
use railcomp_core::{
    AppConfig, Carriage, CarriageType, ComfortClass, Locomotive, Seat, SeatReport, SeatType, Train,
};
use tracing::info;

pub fn run(config: &AppConfig) -> Result<()> {
    let seat1 = Seat::new(1, SeatType::Lower, ComfortClass::Compartment);
    let seat2 = Seat::new(2, SeatType::Upper, ComfortClass::Compartment);
    let seat3 = Seat::new(1, SeatType::Lower, ComfortClass::Open);

    println!(
        "Seats compared (same class, different type): {}",
        seat1 == seat2
    );
    println!("Seats compared (different class): {}", seat1 == seat3);

    let train = sample_train(seat1, seat2, seat3);
    println!("Composed {train}");
    if let Some(locomotive) = train.locomotive() {
        println!("  locomotive {locomotive}");
    }
    for carriage in train.carriages() {
        println!("  {carriage}");
    }

    let data_path = config.data_path();
    train
        .save(&data_path)
        .with_context(|| format!("failed to save {train}"))?;
    println!("Train saved: {}", data_path.display());

    let loaded = Train::load(&data_path)?;
    println!(
        "Train loaded: {} with {} carriages",
        loaded.number(),
        loaded.carriages().len()
    );

    let report_path = config.report_path();
    let report = SeatReport::build(&loaded);
    report.write(&report_path)?;
    println!(
        "Report saved: {} ({} seats)",
        report_path.display(),
        report.rows().len()
    );

    info!(train = %loaded.number(), "demonstration finished");
    Ok(())
}

fn sample_train(seat1: Seat, seat2: Seat, seat3: Seat) -> Train {
    let mut compartment = Carriage::new(10, CarriageType::Compartment);
    compartment.add_seat(seat1);
    compartment.add_seat(seat2);

    let mut open = Carriage::new(11, CarriageType::Open);
    open.add_seat(seat3);

    let mut train = Train::new("045А", "Москва - Санкт-Петербург");
    train.set_locomotive(Locomotive::new("ТЭП-70-1234", 4000));
    train.add_carriage(compartment);
    train.add_carriage(open);
    train
}
