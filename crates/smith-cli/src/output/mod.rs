use smith_gen::Summary;

use crate::cli::OutputFormat;
use crate::progress;

pub mod table;

const SUMMARY_HEADERS: [&str; 4] = ["All files", "All classes", "Related classes", "Added methods"];

/// Render the run summary in the requested format.
pub fn render(summary: &Summary, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Table => Ok(render_table(summary)),
    }
}

/// Print the run summary to stdout.
pub fn output(summary: &Summary, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(summary, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table(summary: &Summary) -> String {
    let options = table::TableOptions {
        max_width: progress::term_width(),
    };
    let row = vec![
        summary.files_scanned.to_string(),
        summary.classes_found.to_string(),
        summary.classes_updated.to_string(),
        summary.methods_added.to_string(),
    ];
    table::render_table(&SUMMARY_HEADERS, &[row], options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use smith_gen::Summary;

    use super::render;
    use crate::cli::OutputFormat;

    fn summary() -> Summary {
        Summary {
            files_scanned: 12,
            classes_found: 9,
            classes_updated: 3,
            methods_added: 17,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&summary(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["files_scanned"], 12);
        assert_eq!(parsed["methods_added"], 17);
    }

    #[test]
    fn table_render_has_summary_headers() {
        let out = render(&summary(), OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        for header in ["All files", "All classes", "Related classes", "Added methods"] {
            assert!(lines[0].contains(header), "missing {header}");
        }
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].contains("17"));
    }
}
