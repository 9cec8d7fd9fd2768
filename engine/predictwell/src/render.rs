//! Plain-text report formatting.

use predictwell_scoring::{
    band_for, PortalAssessment, Projection, RegionScores, RiskAssessment, RiskBand, Trajectory,
    WellnessRisk,
};
use predictwell_trend::TrendReport;

use crate::DailyReport;

fn band_label(band: Option<RiskBand>) -> String {
    band.map_or_else(|| "unbanded".to_string(), |b| b.to_string())
}

pub fn trend(report: &TrendReport) -> String {
    let mut out = format!("observations: {}\n", report.observations);
    match report.smoothed {
        Some(v) => out.push_str(&format!(
            "smoothed:     {v:.3} ({})\n",
            band_label(band_for(v))
        )),
        None => out.push_str("smoothed:     n/a (no history)\n"),
    }
    out.push_str(if report.drift {
        "drift:        upward drift detected\n"
    } else {
        "drift:        none\n"
    });
    if report.forecast.is_empty() {
        out.push_str("forecast:     n/a\n");
    } else {
        out.push_str("forecast:\n");
        for (k, (p, lo, hi)) in report.forecast.steps().enumerate() {
            out.push_str(&format!("  +{:<3} {p:.3}  [{lo:.3}, {hi:.3}]\n", k + 1));
        }
    }
    out
}

pub fn daily(report: &DailyReport) -> String {
    let mut out: String = report
        .days
        .iter()
        .enumerate()
        .map(|(i, day)| {
            format!(
                "day {:>3}: {:.3} ({})  ema {:.3}\n",
                i + 1,
                day.index,
                band_label(day.band),
                day.smoothed
            )
        })
        .collect();
    out.push_str(&trend(&report.trend));
    out
}

pub fn assessment(title: &str, a: &RiskAssessment) -> String {
    let mut out = format!("{title} risk: {:.1}/100 ({})\n", a.score, a.level);
    for flag in &a.flags {
        out.push_str(&format!("  - {flag}\n"));
    }
    out
}

pub fn portal(a: &PortalAssessment, t: &Trajectory) -> String {
    let mut out = format!("portal risk: {:.1}/100 ({})\n", a.score, a.bucket);
    for c in &a.contributors {
        out.push_str(&format!("  - {c}\n"));
    }
    out.push_str("outlook:\n");
    for (label, p) in [("now", t.now), ("+14d", t.day_14), ("+28d", t.day_28)] {
        out.push_str(&projection(label, p));
    }
    out
}

fn projection(label: &str, p: Projection) -> String {
    format!("  {label:<6}{:>5.1} ({})\n", p.score, p.bucket)
}

pub fn regions(s: &RegionScores) -> String {
    let mut out = format!("total risk: {:.2}\n", s.total_risk);
    for (name, v) in [
        ("arm load", s.arm_load),
        ("workload", s.workload),
        ("recovery", s.recovery),
        ("mental", s.mental),
        ("lower body", s.lower_body),
    ] {
        out.push_str(&format!("  {name:<10} {v:.2}\n"));
    }
    out
}

pub fn wellness(r: &WellnessRisk) -> String {
    format!("wellness risk: {:.3} ({})\n", r.risk_score, r.category)
}
