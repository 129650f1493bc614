use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{ArgEnum, Parser};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use activity_gen::catalog::Catalog;
use activity_gen::dates::{default_start, exclusive_end, DateRange};
use activity_gen::document::{write_json, Document, OutputFormat, Schema, DEFAULT_OUTPUT_FILE};
use activity_gen::generator::Generator;
use activity_gen::sampler::RngSampler;

#[derive(ArgEnum, Clone, Copy, Debug)]
enum SchemaArg {
    /// `[{"<date>": "<activity>"}]` from the classic catalog
    DateKeyed,
    /// `[{"date", "activity": {"name", "active"}}]` from the classic catalog
    Nested,
    /// `{"activities", "categories"}` from the categorized catalog
    Composite,
}

#[derive(Parser)]
#[clap(author, version, about = "Generates mock daily activity data", long_about = None)]
struct Cli {
    /// The JSON file to write, overwritten if it exists
    #[clap(short, long, parse(from_os_str), default_value = DEFAULT_OUTPUT_FILE)]
    pub(crate) output: PathBuf,
    /// Shape of the generated document
    #[clap(long, arg_enum, default_value = "composite")]
    pub(crate) schema: SchemaArg,
    /// First generated day
    #[clap(long)]
    pub(crate) start: Option<NaiveDate>,
    /// Day after the last generated one, defaults to tomorrow
    #[clap(long)]
    pub(crate) end: Option<NaiveDate>,
    /// Seed for reproducible output
    #[clap(long)]
    pub(crate) seed: Option<u64>,
    /// Write the JSON without indentation
    #[clap(long)]
    pub(crate) compact: bool,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::DateKeyed => Schema::DateKeyed,
            SchemaArg::Nested => Schema::Nested,
            SchemaArg::Composite => Schema::Composite,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let schema = Schema::from(cli.schema);
    let catalog = match schema {
        Schema::DateKeyed | Schema::Nested => Catalog::classic()?,
        Schema::Composite => Catalog::categorized()?,
    };

    let start = cli.start.unwrap_or_else(default_start);
    let end = cli
        .end
        .unwrap_or_else(|| exclusive_end(Local::now().naive_local()));
    let range = DateRange::new(start, end);

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let records = Generator::new(&catalog, RngSampler::new(rng)).generate(range);

    let document = Document::new(schema, &catalog, &records)?;
    let format = if cli.compact {
        OutputFormat::Compact
    } else {
        OutputFormat::Pretty
    };
    let summary = write_json(&cli.output, &document, format)?;
    info!("Wrote {}", cli.output.display());
    println!("{}", summary);

    Ok(())
}
