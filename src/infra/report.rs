// ============================================================
// Layer 6 - Report Writer
// ============================================================
// Writes a VerifyOutcome to any `io::Write` (stdout in the CLI,
// a Vec<u8> in tests).
//
// Text layout:
//   1. Original class distribution
//   2. Per-class split sizes (share of the class)
//   3. Merged split sizes with class counts and phishing share
//   4. Integrity / ratio / balance checks with PASS or FAIL
//
// Percentages are printed with one decimal place.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::verify_use_case::VerifyOutcome;
use crate::data::dataset::fraction;
use crate::domain::sample::Label;
use crate::domain::split::SplitKind;

const RULE_WIDTH: usize = 70;

/// Output format for the verification report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Renders verification outcomes in one format.
pub struct ReportWriter {
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn write<W: Write>(&self, out: &mut W, outcome: &VerifyOutcome) -> Result<()> {
        match self.format {
            ReportFormat::Text => write_text(out, outcome),
            ReportFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, outcome)?;
                writeln!(out)?;
                Ok(())
            }
        }
    }

    /// Render into an owned String
    pub fn render(&self, outcome: &VerifyOutcome) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf, outcome)?;
        Ok(String::from_utf8(buf)?)
    }
}

fn pct(value: f64) -> f64 {
    value * 100.0
}

fn verdict(passed: bool) -> &'static str {
    if passed { "PASS" } else { "FAIL" }
}

fn heading<W: Write>(out: &mut W, title: &str) -> Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "{title}")?;
    writeln!(out, "{rule}")?;
    Ok(())
}

fn class_name(label: Label) -> &'static str {
    match label {
        Label::Legitimate => "Legitimate",
        Label::Phishing   => "Phishing",
    }
}

fn write_text<W: Write>(out: &mut W, outcome: &VerifyOutcome) -> Result<()> {
    let report = &outcome.report;
    let ratios = &outcome.ratios;
    let total  = report.original.total;

    let ratio_label = format!(
        "{:.0}:{:.0}:{:.0}",
        pct(ratios.train()),
        pct(ratios.validation()),
        pct(ratios.test()),
    );

    // ── Original distribution ────────────────────────────────────────────────
    heading(out, "Original data distribution")?;
    writeln!(out, "Total: {total}")?;
    writeln!(out, "Legitimate(0): {}", report.original.legitimate)?;
    writeln!(out, "Phishing(1): {}", report.original.phishing)?;

    // ── Per-class split ──────────────────────────────────────────────────────
    writeln!(out)?;
    heading(out, &format!("Per-class {ratio_label} split (seed {})", outcome.config.seed))?;
    writeln!(out)?;
    for sizes in &report.per_class {
        writeln!(out, "{}({}) rows: {}", class_name(sizes.label), sizes.label.as_u8(), sizes.total)?;
    }

    for sizes in &report.per_class {
        writeln!(out)?;
        writeln!(out, "{} class split:", class_name(sizes.label))?;
        for kind in SplitKind::ALL {
            let n = sizes.size(kind);
            writeln!(
                out,
                "  {:<6} {} ({:.1}%)",
                format!("{kind}:"),
                n,
                pct(fraction(n, sizes.total)),
            )?;
        }
    }

    // ── Merged split ─────────────────────────────────────────────────────────
    writeln!(out)?;
    writeln!(out, "Final split (after merge):")?;
    for s in &report.splits {
        writeln!(
            out,
            "{:<6} {} - legitimate:{}, phishing:{}",
            format!("{}:", s.kind),
            s.distribution.total,
            s.distribution.legitimate,
            s.distribution.phishing,
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Phishing share per split:")?;
    for s in SplitKind::ALL.iter().filter_map(|&kind| report.split(kind)) {
        writeln!(out, "{:<6} {:.1}%", format!("{}:", s.kind), pct(s.phishing_share))?;
    }

    // ── Checks ───────────────────────────────────────────────────────────────
    writeln!(out)?;
    heading(out, "Checks")?;

    let integrity = &report.integrity;
    writeln!(out)?;
    writeln!(out, "1. Row integrity:")?;
    writeln!(out, "   Train + Val + Test = {}", integrity.split_rows)?;
    writeln!(out, "   Original = {}", integrity.original_rows)?;
    if integrity.lost_rows == 0 {
        writeln!(out, "   OK: counts match")?;
    } else {
        writeln!(out, "   MISMATCH (lost: {})", integrity.lost_rows)?;
    }
    writeln!(
        out,
        "   Duplicated ids: {}, missing ids: {}",
        integrity.duplicated_ids, integrity.missing_ids
    )?;
    writeln!(out, "   {}", verdict(integrity.passed))?;

    writeln!(out)?;
    writeln!(out, "2. Expected ratios ({ratio_label}):")?;
    for s in &report.splits {
        writeln!(
            out,
            "   Expected {:<6} {} ({:.1}%)",
            format!("{}:", s.kind),
            s.expected_rows,
            pct(fraction(s.expected_rows, total)),
        )?;
    }
    writeln!(out)?;
    for s in &report.splits {
        writeln!(
            out,
            "   Actual {:<6} {} ({:.1}%)",
            format!("{}:", s.kind),
            s.distribution.total,
            pct(s.actual_fraction),
        )?;
    }
    writeln!(
        out,
        "   {} (max deviation {:.2} pp, tolerance {:.2} pp)",
        verdict(report.ratios.passed),
        pct(report.ratios.max_deviation),
        pct(report.ratios.tolerance),
    )?;

    writeln!(out)?;
    writeln!(out, "3. Class balance per split:")?;
    for s in &report.splits {
        writeln!(
            out,
            "   {:<6} legitimate {:.1}%, phishing {:.1}%",
            format!("{}:", s.kind),
            pct(s.legitimate_share),
            pct(s.phishing_share),
        )?;
    }
    writeln!(
        out,
        "   {} (original phishing share {:.1}%, max deviation {:.2} pp, tolerance {:.2} pp)",
        verdict(report.balance.passed),
        pct(report.balance.original_share),
        pct(report.balance.max_deviation),
        pct(report.balance.tolerance),
    )?;

    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "Overall: {}", verdict(outcome.passed()))?;
    Ok(())
}
