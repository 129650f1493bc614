use std::error::Error;
use std::io;
use std::time::Instant;

use chrono::NaiveDate;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use activity_gen::catalog::Catalog;
use activity_gen::dates::DateRange;
use activity_gen::document::{Document, OutputFormat, Schema};
use activity_gen::generator::Generator;
use activity_gen::sampler::RngSampler;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let start = NaiveDate::from_ymd_opt(1900, 1, 1).ok_or("bad start date")?;
    let end = NaiveDate::from_ymd_opt(2100, 1, 1).ok_or("bad end date")?;
    let catalog = Catalog::categorized()?;
    let sampler = RngSampler::new(StdRng::seed_from_u64(0));

    let started = Instant::now();
    let records = Generator::new(&catalog, sampler).generate(DateRange::new(start, end));
    warn!("Generating {} days took: {:.2?}", records.len(), started.elapsed());

    let start_writing = Instant::now();
    let document = Document::new(Schema::Composite, &catalog, &records)?;
    document.to_writer(io::sink(), OutputFormat::Pretty)?;
    warn!("Serializing took: {:.2?}", start_writing.elapsed());

    warn!("Total took: {:.2?}", started.elapsed());

    Ok(())
}
