//! Fixed-format console report for a validated roadmap.

use std::fmt::Write;

use crate::schema::Roadmap;

/// Render the roadmap as a console report.
///
/// Header with target and timeframe, then each skill gap with its time
/// estimate, description, and resources in original list order. Headers are
/// uppercased; the priority label is left-aligned in a fixed-width column.
pub fn render(roadmap: &Roadmap) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "CAREER TRANSITION ROADMAP: {}",
        roadmap.target.to_uppercase()
    );
    let _ = writeln!(out, "ALLOCATED TIMEFRAME: {}", roadmap.time_allocated);
    let _ = writeln!(out, "{rule}");

    let _ = writeln!(out, "TECHNICAL SKILL GAP ANALYSIS");
    let _ = writeln!(out, "{}", "-".repeat(30));

    for (i, gap) in roadmap.gaps.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", i + 1, gap.skill.to_uppercase());
        let _ = writeln!(out, "   TIME ESTIMATE : {}", gap.learning_time_estimate);
        let _ = writeln!(out, "   DESCRIPTION   : {}", gap.description);

        let _ = writeln!(out, "   LEARNING RESOURCES:");
        for res in &gap.learning_resources {
            let label = format!("[{}]", res.priority.to_uppercase());
            let _ = writeln!(out, "      - {label:<10} {}", res.name);
            let _ = writeln!(out, "        TYPE       : {}", res.resource_type.to_uppercase());
            let _ = writeln!(out, "        SOURCE     : {}", res.link);
        }
    }

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "END OF GENERATED ROADMAP");

    out
}
