use crate::run::ErrorKind;
use anyhow::Result;
use litegen_codegen::GenerationReport;
use serde::Serialize;

/// Human-readable summary printed after a successful run
pub fn render_summary(report: &GenerationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Successfully generated container code to {}\n",
        report.output_dir.display()
    ));
    out.push_str(&format!("Module: {}\n", report.module_name));

    for layer in &report.layers {
        let unregistered = layer.components - layer.registered;
        let suffix = if unregistered > 0 {
            format!(" ({unregistered} without factory)")
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  {:<11} {:>3} components{}\n",
            layer.layer.as_str(),
            layer.components,
            suffix
        ));
    }

    out.push_str(&format!(
        "{} components, {} registered, {} files written",
        report.total_components(),
        report.total_registered(),
        report.files.len()
    ));
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    status: &'static str,
    #[serde(flatten)]
    report: &'a GenerationReport,
}

pub fn render_json(report: &GenerationReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport {
        status: "ok",
        report,
    })?)
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    status: &'static str,
    kind: ErrorKind,
    message: &'a str,
}

pub fn render_json_error(kind: ErrorKind, message: &str) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonFailure {
        status: "error",
        kind,
        message,
    })?)
}
