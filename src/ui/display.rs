//! Display functions for bundles and validation reports

use console::Style;

use crate::commands::inspect::Inspection;
use crate::domain::{AssembledBundle, CheckResult, ValidationReport};

/// One report line, e.g. `  ✓ executable  demo is executable`
pub fn format_check(check: &CheckResult) -> String {
    let (mark, style) = if check.passed {
        ("✓", Style::new().green())
    } else {
        ("✗", Style::new().red())
    };
    format!(
        "  {} {:<16} {}",
        style.apply_to(mark),
        Style::new().bold().apply_to(check.name),
        check.detail
    )
}

/// Display a validation report
pub fn display_report(report: &ValidationReport) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Bundle:"),
        report.bundle().display()
    );
    for check in report.checks() {
        println!("{}", format_check(check));
    }

    let failures = report.failures().count();
    if failures == 0 {
        println!("{}", Style::new().green().bold().apply_to("Bundle is valid"));
    } else {
        println!(
            "{}",
            Style::new()
                .red()
                .bold()
                .apply_to(format!("{failures} check(s) failed"))
        );
    }
}

/// Display the outcome of a successful assembly
pub fn display_assembled(bundle: &AssembledBundle) {
    let count = bundle.resources().map_or(0, <[_]>::len);
    println!(
        "{} {} ({count} resource(s))",
        Style::new().green().bold().apply_to("Assembled"),
        bundle.root().display()
    );
}

/// Display manifest, executable and resources of a bundle
pub fn display_inspection(inspection: &Inspection) {
    println!(
        "{} {}",
        Style::new().bold().apply_to("Bundle:"),
        inspection.bundle.display()
    );

    println!("  {}", Style::new().bold().apply_to("Manifest:"));
    for (key, value) in &inspection.manifest {
        println!(
            "    {} {}",
            Style::new().cyan().apply_to(format!("{key}:")),
            value.as_deref().unwrap_or("<not a string>")
        );
    }

    println!(
        "  {} {}",
        Style::new().bold().apply_to("Executable:"),
        inspection.executable.as_deref().unwrap_or("<none>")
    );

    println!("  {}", Style::new().bold().apply_to("Resources:"));
    if inspection.resources.is_empty() {
        println!("    {}", Style::new().dim().apply_to("(none)"));
    }
    for resource in &inspection.resources {
        println!(
            "    Resources/{} {}",
            resource.destination,
            Style::new().dim().apply_to(&resource.hash)
        );
    }
}
