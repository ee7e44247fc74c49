use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickerviz::provider::csv::{load_chain_csv, load_price_csv};
use tickerviz::provider::MemoryTicker;
use tickerviz::utils::init_logger;
use tickerviz::{options_table, stock_chart, Timer};

#[derive(Parser)]
#[command(name = "tickerviz")]
#[command(about = "Render stock price charts and options chain tables from CSV fixtures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a closing price chart as SVG
    Chart {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,
        /// CSV file with price bars (time,open,high,low,close,volume)
        #[arg(short, long)]
        data: PathBuf,
        /// Time period: 1d, 1mo, 3mo, 1y, 2y, 5y, 10y, ytd, max
        #[arg(short, long, default_value = "1mo")]
        period: String,
        /// Company logo URL to overlay
        #[arg(long)]
        logo: Option<String>,
        /// Output SVG path (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Print the options chain table for one expiry and side
    Options {
        /// Ticker symbol
        #[arg(short, long)]
        symbol: String,
        /// CSV file with option chain rows
        #[arg(short, long)]
        data: PathBuf,
        /// Expiry date (YYYY-MM-DD), nearest when omitted
        #[arg(long)]
        date: Option<String>,
        /// Side of the chain: calls or puts
        #[arg(short, long)]
        kind: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logger()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chart {
            symbol,
            data,
            period,
            logo,
            out,
        } => {
            let timer = Timer::start("chart render");
            let bars = load_price_csv(&data)?;

            // The 1d view is backed by intraday bars, everything else by daily
            let ticker = if period == "1d" {
                MemoryTicker::new(&symbol).with_intraday(bars)
            } else {
                MemoryTicker::new(&symbol).with_daily(bars)
            };
            let ticker = match logo {
                Some(url) => ticker.with_logo_url(url),
                None => ticker,
            };

            let chart = stock_chart(&ticker, &period)?;
            timer.log_elapsed();

            match out {
                Some(path) => {
                    std::fs::write(&path, chart.as_svg())?;
                    println!(
                        "📈 {} ({} points) written to {}",
                        chart.title(),
                        chart.points(),
                        path.display()
                    );
                }
                None => println!("{}", chart.as_svg()),
            }
        }
        Commands::Options {
            symbol,
            data,
            date,
            kind,
        } => {
            let timer = Timer::start("options table render");
            let chains = load_chain_csv(&data)?;
            let ticker = MemoryTicker::new(&symbol).with_chains(chains);

            let table = options_table(&ticker, date.as_deref(), kind.as_deref())?;
            timer.log_elapsed();

            println!(
                "{} {} expiring {} ({} contracts)",
                table.symbol(),
                table.kind(),
                table.expiry(),
                table.rows()
            );
            println!("{}", table);
        }
    }

    Ok(())
}
