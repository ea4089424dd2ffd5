use std::fmt;
use std::io::BufRead;

use thiserror::Error;

/// Errors raised while reading an interval file.
#[derive(Debug, Error)]
pub enum IntervalParseError {
    /// Line does not have `chrom start stop score` columns.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// Underlying reader failed.
    #[error("failed to read intervals: {0}")]
    Io(#[from] std::io::Error),
}

/// Raw `(chromosome, start, stop, score)` tuple from an interval source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredInterval {
    /// Chromosome name.
    pub chromosome: String,
    /// Inclusive start.
    pub start: u64,
    /// Exclusive stop.
    pub stop: u64,
    /// Raw state score.
    pub score: i32,
}

impl ScoredInterval {
    /// Construct a scored interval.
    pub fn new(chromosome: impl Into<String>, start: u64, stop: u64, score: i32) -> Self {
        Self {
            chromosome: chromosome.into(),
            start,
            stop,
            score,
        }
    }
}

/// State-tagged interval ready for bedgraph rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BedGraphRecord {
    /// Chromosome name.
    pub chromosome: String,
    /// Inclusive start.
    pub start: u64,
    /// Exclusive stop.
    pub stop: u64,
    /// State score.
    pub score: i32,
}

impl fmt::Display for BedGraphRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}",
            self.chromosome, self.start, self.stop, self.score
        )
    }
}

/// Parse one bedgraph line. `track`/`browser` headers, comments and blank
/// lines yield `None`. `line_no` is only used for error messages.
pub fn parse_bedgraph_line(
    line: &str,
    line_no: usize,
) -> Result<Option<ScoredInterval>, IntervalParseError> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with('#')
        || trimmed.starts_with("track")
        || trimmed.starts_with("browser")
    {
        return Ok(None);
    }

    let malformed = |reason: String| IntervalParseError::Malformed {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = trimmed.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(malformed(format!(
            "expected 4 columns, found {}",
            fields.len()
        )));
    }

    let coordinate = |value: &str, name: &str| {
        value
            .parse::<u64>()
            .map_err(|_| malformed(format!("invalid {name} '{value}'")))
    };
    let start = coordinate(fields[1], "start")?;
    let stop = coordinate(fields[2], "stop")?;
    let score = parse_score(fields[3])
        .ok_or_else(|| malformed(format!("invalid score '{}'", fields[3])))?;

    Ok(Some(ScoredInterval::new(fields[0], start, stop, score)))
}

/// Scores are integers, but bedgraph writers often emit `4.0`.
fn parse_score(value: &str) -> Option<i32> {
    if let Ok(score) = value.parse::<i32>() {
        return Some(score);
    }
    let float = value.parse::<f64>().ok()?;
    if float.fract() == 0.0 && float >= i32::MIN as f64 && float <= i32::MAX as f64 {
        Some(float as i32)
    } else {
        None
    }
}

/// Intervals read from a bedgraph stream, with the number of malformed
/// lines that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalBatch {
    /// Well-formed intervals in file order.
    pub intervals: Vec<ScoredInterval>,
    /// Malformed lines rejected while reading.
    pub skipped: u64,
}

/// Read every interval from a bedgraph stream.
///
/// Malformed lines are logged and skipped; only a failing reader aborts.
/// Whether the surviving intervals form a valid index is decided later by
/// [`BlockIndex`](super::BlockIndex).
pub fn read_bedgraph<R: BufRead>(reader: R) -> Result<IntervalBatch, IntervalParseError> {
    let mut batch = IntervalBatch::default();
    for (idx, line) in reader.lines().enumerate() {
        match parse_bedgraph_line(&line?, idx + 1) {
            Ok(Some(interval)) => batch.intervals.push(interval),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!("skipping interval: {err}");
                batch.skipped += 1;
            }
        }
    }
    if batch.skipped > 0 {
        tracing::warn!(skipped = batch.skipped, "malformed interval lines were skipped");
    }
    Ok(batch)
}
