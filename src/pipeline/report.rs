use std::io::Write;

use anyhow::{anyhow, Result};

use crate::blocks::{BedGraphRecord, BlockIndex, GenomeStatistics};
use crate::state::BlockState;

const STATISTICS_HEADER: &str =
    "#chrom\tstart\tstop\tstate\tvariants\tmie\tmie_pct\tsce\tsce_pct\tni\tni_pct\n";

/// Write bedgraph records, one per line.
pub fn write_bedgraph<W: Write>(writer: &mut W, records: &[BedGraphRecord]) -> Result<()> {
    for record in records {
        writeln!(writer, "{record}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Render bedgraph records into a string.
pub fn render_bedgraph(records: &[BedGraphRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_bedgraph(&mut buffer, records)?;
    String::from_utf8(buffer).map_err(|_| anyhow!("rendered bedgraph is not valid UTF-8"))
}

/// Write a tab-separated per-block statistics table.
pub fn write_block_statistics<W: Write, S: BlockState>(
    writer: &mut W,
    index: &BlockIndex<S>,
) -> Result<()> {
    writer.write_all(STATISTICS_HEADER.as_bytes())?;
    for block in index.iter() {
        let stats = block.statistics();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{}\t{:.2}\t{}\t{:.2}",
            stats.chromosome,
            stats.start,
            stats.stop,
            stats.state.as_deref().unwrap_or("PARTIAL"),
            stats.counts.variants,
            stats.counts.mie,
            stats.mie_percent(),
            stats.counts.sce,
            stats.sce_percent(),
            stats.counts.not_informative,
            stats.not_informative_percent(),
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the genome-wide summary as `key\tvalue` lines.
pub fn write_genome_statistics<W: Write>(writer: &mut W, stats: &GenomeStatistics) -> Result<()> {
    writeln!(writer, "blocks\t{}", stats.blocks)?;
    writeln!(writer, "partial_blocks\t{}", stats.partial_blocks)?;
    writeln!(writer, "covered_bases\t{}", stats.covered_bases)?;
    writeln!(writer, "variants\t{}", stats.counts.variants)?;
    writeln!(writer, "mie\t{}\t{:.4}", stats.counts.mie, stats.mie_percent())?;
    writeln!(writer, "sce\t{}\t{:.4}", stats.counts.sce, stats.sce_percent())?;
    writeln!(
        writer,
        "not_informative\t{}\t{:.4}",
        stats.counts.not_informative,
        stats.not_informative_percent()
    )?;
    writer.flush()?;
    Ok(())
}
