//! @ai:module:intent Human-readable console output of a benchmark run
//! @ai:module:layer presentation
//! @ai:module:public_api ConsoleReporter
//! @ai:module:stateless true

use crate::generator::Variant;
use crate::metrics::{MemoryReading, TimingSummary};
use std::io::{self, Write};

/// Width of the centred variant banner.
const BANNER_WIDTH: usize = 50;

/// @ai:intent Formats banner, progress and summary lines
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// @ai:intent Banner with the variant name centred in asterisks
    /// @ai:example (NoFuture) -> "*************** example_no_future ****************"
    /// @ai:effects pure
    pub fn banner(variant: Variant) -> String {
        format!("{:*^width$}", format!(" {} ", variant), width = BANNER_WIDTH)
    }

    /// @ai:intent Import time line with mean and standard deviation
    /// @ai:effects pure
    pub fn import_time_line(summary: &TimingSummary) -> String {
        format!(
            "Import time: {:.2}s \u{00B1}{:.2}s",
            summary.geometric_mean_secs, summary.stdev_secs
        )
    }

    /// @ai:intent Memory line with the probe output as reported
    /// @ai:effects pure
    pub fn memory_line(memory: &MemoryReading) -> String {
        format!("RSS Memory usage: {}", memory.raw)
    }

    /// @ai:effects io
    pub fn write_banner<W: Write>(out: &mut W, variant: Variant) -> io::Result<()> {
        writeln!(out, "{}", Self::banner(variant))
    }

    /// @ai:intent Emit one progress dot and flush so it shows immediately
    /// @ai:effects io
    pub fn write_progress<W: Write>(out: &mut W) -> io::Result<()> {
        write!(out, ".")?;
        out.flush()
    }

    /// @ai:intent Terminate the progress line and print timing summary
    /// @ai:effects io
    pub fn write_timing<W: Write>(out: &mut W, summary: &TimingSummary) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", Self::import_time_line(summary))
    }

    /// @ai:effects io
    pub fn write_memory<W: Write>(out: &mut W, memory: &MemoryReading) -> io::Result<()> {
        writeln!(out, "{}", Self::memory_line(memory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_banner_is_centred() {
        let banner = ConsoleReporter::banner(Variant::NoFuture);
        assert_eq!(banner.chars().count(), 50);
        assert_eq!(banner, format!("{} example_no_future {}", "*".repeat(15), "*".repeat(16)));

        let banner = ConsoleReporter::banner(Variant::WithFuture);
        assert_eq!(banner, format!("{} example_with_future {}", "*".repeat(14), "*".repeat(15)));
    }

    #[test]
    fn test_import_time_line() {
        let summary = TimingSummary {
            geometric_mean_secs: 1.234,
            stdev_secs: 0.056,
            samples: 20,
            warmup_excluded: 1,
        };
        assert_eq!(
            ConsoleReporter::import_time_line(&summary),
            "Import time: 1.23s \u{00B1}0.06s"
        );
    }

    #[test]
    fn test_full_variant_block() {
        let mut out = Vec::new();
        let summary = TimingSummary {
            geometric_mean_secs: 1.0,
            stdev_secs: 0.0,
            samples: 3,
            warmup_excluded: 1,
        };

        ConsoleReporter::write_banner(&mut out, Variant::WithFuture).unwrap();
        for _ in 0..4 {
            ConsoleReporter::write_progress(&mut out).unwrap();
        }
        ConsoleReporter::write_timing(&mut out, &summary).unwrap();
        ConsoleReporter::write_memory(&mut out, &MemoryReading::parse("12.00 MB\n")).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "....");
        assert_eq!(lines[2], "Import time: 1.00s \u{00B1}0.00s");
        assert_eq!(lines[3], "RSS Memory usage: 12.00 MB");
    }
}
