//! JSON output for chart bundles.
//!
//! The bundle is written as a single pretty-printed object with `bars`,
//! `overlays`, `panels` and `notices`. Absent values become `null`.

use std::io::Write;

use stockdash::plot::PlotBundle;

use crate::csv_writer::OutputDest;
use crate::error::Result;

/// Write a chart bundle as JSON.
///
/// # Errors
///
/// Returns `CliError::IoError` if the destination cannot be opened and
/// `CliError::OutputError` if serialization fails.
pub fn write_bundle_json(bundle: &PlotBundle, dest: &OutputDest) -> Result<()> {
    let mut writer = dest.writer()?;
    serde_json::to_writer_pretty(&mut writer, bundle)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash::pipeline::Pipeline;
    use stockdash::raw::RawTable;

    #[test]
    fn test_write_bundle_json() {
        let raw = RawTable::new(vec!["2024-01-02".to_string(), "2024-01-03".to_string()])
            .with_column("Open", vec![10.0, 10.5])
            .unwrap()
            .with_column("High", vec![10.8, 11.0])
            .unwrap()
            .with_column("Low", vec![9.9, 10.2])
            .unwrap()
            .with_column("Close", vec![10.5, 10.9])
            .unwrap();
        let bundle = Pipeline::default().run(&raw).unwrap();

        let path = std::env::temp_dir().join(format!("stockdash_{}_bundle.json", std::process::id()));
        write_bundle_json(&bundle, &OutputDest::File(path.display().to_string())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(json["bars"].as_array().unwrap().len(), 2);
        assert_eq!(json["bars"][1]["close"], 10.9);
        assert_eq!(json["overlays"][0]["name"], "MA20");
        assert_eq!(json["overlays"][0]["values"], serde_json::json!([null, null]));
        assert_eq!(json["panels"][2]["style"], "dashed");
        assert_eq!(json["notices"].as_array().unwrap().len(), 3);

        std::fs::remove_file(&path).ok();
    }
}
