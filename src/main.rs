use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use quartet::blocks::read_bedgraph;
use quartet::pipeline::{open_variants, write_bedgraph, write_block_statistics, write_genome_statistics};
use quartet::{
    BlockIndex, BlockScanner, BlockState, CrossTriosState, FilterPolicy, Genotype, PerMember,
    QuartetState, ScanConfig, ScanSummary, SiteOutcome, VariantSite,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "quartet", about = "Inheritance-state classification for family quartets")]
struct Cli {
    /// Log skipped records and progress at debug level.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify variants against inheritance blocks and report error rates.
    Scan {
        #[command(flatten)]
        input: ScanInput,
    },
    /// Print the pattern, candidate states and block outcome of every site.
    Annotate {
        #[command(flatten)]
        input: ScanInput,
    },
    /// Classify one quartet genotype combination.
    Pattern {
        /// Father genotype (e.g. 0/1).
        father: String,
        /// Mother genotype.
        mother: String,
        /// First child genotype.
        child1: String,
        /// Second child genotype.
        child2: String,
    },
    /// Validate a block file and write it back as sorted bedgraph.
    Blocks {
        /// Bedgraph file of scored blocks.
        blocks: PathBuf,
        /// State family encoded by the block scores.
        #[arg(long, value_enum, default_value_t = Mode::Quartet)]
        mode: Mode,
    },
}

#[derive(clap::Args, Debug)]
struct ScanInput {
    /// Bedgraph file of scored blocks.
    #[arg(long)]
    blocks: PathBuf,
    /// Quartet VCF or BCF, plain or bgzipped (`-` for stdin).
    #[arg(long)]
    variants: PathBuf,
    /// State family encoded by the block scores.
    #[arg(long, value_enum, default_value_t = Mode::Quartet)]
    mode: Mode,
    /// Sample columns for father,mother,child1,child2 (0-based sample indexes).
    #[arg(long, value_delimiter = ',', default_values_t = [0, 1, 2, 3])]
    sample_columns: Vec<usize>,
    /// Keep records regardless of FILTER.
    #[arg(long)]
    accept_all_filters: bool,
    /// Skip sites where any member is unphased.
    #[arg(long)]
    require_phased: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Mode {
    /// Quartet state scores (-1..=5).
    Quartet,
    /// Composite founder-trio scores (0..=8).
    CrossTrios,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan { input } => match input.mode {
            Mode::Quartet => run_scan::<QuartetState>(&input, false)?,
            Mode::CrossTrios => run_scan::<CrossTriosState>(&input, false)?,
        },
        Commands::Annotate { input } => match input.mode {
            Mode::Quartet => run_scan::<QuartetState>(&input, true)?,
            Mode::CrossTrios => run_scan::<CrossTriosState>(&input, true)?,
        },
        Commands::Pattern {
            father,
            mother,
            child1,
            child2,
        } => run_pattern([&father, &mother, &child1, &child2].map(String::as_str))?,
        Commands::Blocks { blocks, mode } => match mode {
            Mode::Quartet => run_blocks::<QuartetState>(&blocks)?,
            Mode::CrossTrios => run_blocks::<CrossTriosState>(&blocks)?,
        },
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_index<S: BlockState>(path: &Path) -> Result<BlockIndex<S>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open block file {}", path.display()))?;
    let batch = read_bedgraph(BufReader::new(file))
        .with_context(|| format!("failed to read block file {}", path.display()))?;
    BlockIndex::from_scored_intervals(&batch.intervals)
        .with_context(|| format!("invalid blocks in {}", path.display()))
}

fn scan_config(input: &ScanInput) -> Result<ScanConfig> {
    let &[father, mother, child1, child2] = input.sample_columns.as_slice() else {
        bail!(
            "--sample-columns needs exactly 4 values, got {}",
            input.sample_columns.len()
        );
    };
    let filter = if input.accept_all_filters {
        FilterPolicy::AcceptAll
    } else {
        FilterPolicy::PassOnly
    };
    Ok(ScanConfig::default()
        .with_sample_columns(PerMember::new(father, mother, child1, child2))
        .with_filter(filter)
        .with_require_phased(input.require_phased))
}

fn run_scan<S: BlockState>(input: &ScanInput, annotate: bool) -> Result<()> {
    let mut index = load_index::<S>(&input.blocks)?;
    let config = scan_config(input)?;

    let mut variants = open_variants(&input.variants)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut write_error = None;

    let summary = BlockScanner::new(&mut index, &config).scan_with(
        &mut variants,
        |site, outcome| {
            if annotate && write_error.is_none() {
                if let Err(err) = write_annotation(&mut out, site, outcome) {
                    write_error = Some(err);
                }
            }
        },
    )?;
    if let Some(err) = write_error {
        return Err(err).context("failed to write annotations");
    }

    if !annotate {
        write_block_statistics(&mut out, &index)?;
        writeln!(out)?;
        write_genome_statistics(&mut out, &index.genome_statistics())?;
    }
    out.flush()?;

    print_summary(&summary);
    Ok(())
}

fn write_annotation<W: Write>(
    out: &mut W,
    site: &VariantSite,
    outcome: Option<SiteOutcome>,
) -> io::Result<()> {
    let outcome = match outcome {
        None => "OUTSIDE",
        Some(SiteOutcome::Consistent) => "CONSISTENT",
        Some(SiteOutcome::Unassessed) => "PARTIAL",
        Some(SiteOutcome::Mie) => "MIE",
        Some(SiteOutcome::NotInformative) => "NI",
        Some(SiteOutcome::StateConsistencyError) => "SCE",
    };
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}\t{}\t{}",
        site.chromosome(),
        site.position() + 1,
        site.reference(),
        site.alternative(),
        site.pattern(),
        site.candidates(),
        outcome
    )
}

fn print_summary(summary: &ScanSummary) {
    eprintln!(
        "sites={}\toutside={}\tconsistent={}\tpartial={}\tmie={}\tni={}\tsce={}\tskipped={}",
        summary.sites,
        summary.outside_blocks,
        summary.consistent,
        summary.unassessed,
        summary.mie,
        summary.not_informative,
        summary.sce,
        summary.total_skipped()
    );
    for (category, count) in &summary.skipped {
        eprintln!("skipped {category}\t{count}");
    }
}

fn run_pattern(genotypes: [&str; 4]) -> Result<()> {
    let [father, mother, child1, child2] = genotypes;
    let parse = |text: &str| {
        Genotype::parse(text).with_context(|| format!("invalid genotype '{text}'"))
    };
    let genotypes = PerMember::new(parse(father)?, parse(mother)?, parse(child1)?, parse(child2)?);

    let site = VariantSite::new("-", 0, "REF", "ALT", genotypes)
        .context("genotypes do not form a classifiable pattern")?;
    println!("{}\t{}", site.pattern(), site.candidates());
    Ok(())
}

fn run_blocks<S: BlockState>(path: &Path) -> Result<()> {
    let index = load_index::<S>(path)?;
    let records = index
        .bedgraph()
        .context("block states could not be encoded")?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_bedgraph(&mut out, &records)?;

    let stats = index.genome_statistics();
    eprintln!(
        "chromosomes={}\tblocks={}\tpartial={}\tcovered_bases={}",
        index.chromosomes().count(),
        stats.blocks,
        stats.partial_blocks,
        stats.covered_bases
    );
    Ok(())
}
