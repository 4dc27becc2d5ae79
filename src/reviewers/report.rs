use std::io::{self, Write};

use super::analyzer::RankedReviewer;

const SEPARATOR: &str = "----------------------";

/// Write the full ranking followed by the handles of the first
/// `shortlist` reviewers.
pub fn write_report<W: Write>(
    out: &mut W,
    ranked: &[RankedReviewer],
    shortlist: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "*** List of possible reviewers ***")?;
    for reviewer in ranked {
        writeln!(out, "{} with weight {}", reviewer.email, reviewer.weight)?;
    }
    writeln!(out, "{SEPARATOR}")?;

    for reviewer in ranked.iter().take(shortlist) {
        write!(out, "{} ", reviewer.handle())?;
    }
    writeln!(out)?;

    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;
    Ok(())
}

pub fn print_report(ranked: &[RankedReviewer], shortlist: usize) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, ranked, shortlist)?;
    out.flush()
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
