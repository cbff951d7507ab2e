use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};

use custq::output::{self, OutputMode};
use custq::query::{DEFAULT_TOTAL, FilterState, QuerySpec, Recency, ScoreBand, SortDir, SortKey};
use custq::window::{GROW_DELAY, PaginationWindow};
use custq::{DatasetView, RefLists, Synthesizer};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "custq", about = "Query a deterministic synthetic customer dataset", version)]
struct Cli {
    /// Size of the virtual dataset
    #[arg(long, default_value_t = DEFAULT_TOTAL)]
    total: u64,

    /// Substring search over name, email, and phone
    #[arg(long, default_value = "")]
    search: String,

    /// Score filter: high (700+), medium (400-699), low (<400)
    #[arg(long)]
    score: Option<ScoreBand>,

    /// Date filter: recent (within 30 days), older (>30 days)
    #[arg(long)]
    date: Option<Recency>,

    /// Exact-match filter on the user who added the customer
    #[arg(long = "added-by")]
    added_by: Option<String>,

    /// Exact-match filter on the email domain
    #[arg(long)]
    domain: Option<String>,

    /// Sort key: id, name, email, last-message-at, added-by, score
    #[arg(long, default_value = "id")]
    sort: SortKey,

    /// Sort direction: asc or desc
    #[arg(long, default_value = "asc")]
    dir: SortDir,

    /// Rows to print (defaults to the initial window size)
    #[arg(long, default_value_t = 30)]
    limit: usize,

    /// Drive the pagination window through N pages instead of --limit,
    /// with the real 300 ms growth delay between pages
    #[arg(long)]
    pages: Option<usize>,

    /// Output format: table, json, ndjson
    #[arg(long, default_value = "table")]
    format: OutputMode,

    /// Print the single record at this index as JSON and exit
    #[arg(long)]
    index: Option<u64>,

    /// Fix the session clock (RFC 3339) for reproducible output;
    /// defaults to the current time
    #[arg(long, value_parser = parse_timestamp)]
    now: Option<jiff::Timestamp>,

    /// Print only the filtered row count
    #[arg(long = "count-only")]
    count_only: bool,
}

fn parse_timestamp(s: &str) -> Result<jiff::Timestamp, jiff::Error> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let now = cli.now.unwrap_or_else(jiff::Timestamp::now);
    let synth = Synthesizer::new(RefLists::builtin(), now);

    let stdout = io::stdout().lock();
    let mut out = BufWriter::with_capacity(128 * 1024, stdout);

    if let Some(index) = cli.index {
        let rec = synth.synthesize(index);
        serde_json::to_writer_pretty(&mut out, &rec).context("failed to serialize record")?;
        out.write_all(b"\n")?;
        out.flush()?;
        return Ok(());
    }

    let view = DatasetView::materialize(&synth, cli.total);
    let spec = QuerySpec {
        filters: FilterState {
            score: cli.score,
            recency: cli.date,
            added_by: cli.added_by,
            domain: cli.domain,
        },
        search: cli.search,
        sort_by: cli.sort,
        dir: cli.dir,
    };
    let result = view.query(&spec);

    if cli.count_only {
        writeln!(out, "{}", result.len())?;
        out.flush()?;
        return Ok(());
    }

    if let Some(pages) = cli.pages {
        // Stand-in for the scroll collaborator: request a page, wait out the
        // growth delay, commit, until `pages` pages are visible.
        let mut window = PaginationWindow::new();
        let target = pages.saturating_mul(custq::window::PAGE_SIZE);
        while window.loaded() < target {
            let Some(ticket) = window.request_more(result.len()) else {
                break;
            };
            std::thread::sleep(GROW_DELAY);
            window.commit(ticket, result.len());
        }
        output::write_rows(&mut out, window.visible(&result), cli.format)
            .context("failed to write rows")?;
    } else {
        let shown = &result[..cli.limit.min(result.len())];
        output::write_rows(&mut out, shown, cli.format).context("failed to write rows")?;
    }

    out.flush()?;
    Ok(())
}
