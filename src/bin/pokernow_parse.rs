use std::path::PathBuf;

use clap::Parser;
use pokernow_history::history::{HistoryParser, ParserConfig};
use pokernow_history::hole_cards::{attach_hole_cards, HoleCardParser};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pokernow_parse",
    about = "PokerNow history parser",
    long_about = "Reconstructs every hand in a PokerNow event log export and prints them."
)]
struct Args {
    /// A path to a .csv file given by PokerNow to parse
    #[arg(short = 'f', long = "file_path", alias = "file-path")]
    file_path: PathBuf,

    /// Optional folder of JSON hand histories to take hole cards from
    #[arg(long = "hole-cards")]
    hole_cards: Option<PathBuf>,

    /// Print the hands as pretty JSON instead of debug output
    #[arg(long)]
    json: bool,

    /// Fail on hands that have no `starting hand` line
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ParserConfig::new().require_start_line(args.strict);
    let mut hands = HistoryParser::new(config).parse_file(&args.file_path)?;

    if let Some(folder) = &args.hole_cards {
        let known = HoleCardParser::parse_folder(folder)?;
        attach_hole_cards(&mut hands, &known);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hands)?);
    } else {
        println!("{hands:#?}");
    }
    Ok(())
}
