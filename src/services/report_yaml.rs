use std::io::{self, Write};

use crate::services::report_types::{PlanReport, SnapshotReport};

pub fn serialize_plan_report_to_yaml<W: Write>(
    writer: &mut W,
    report: &PlanReport,
) -> io::Result<()> {
    write_yaml(writer, report)
}

pub fn serialize_snapshot_report_to_yaml<W: Write>(
    writer: &mut W,
    report: &SnapshotReport,
) -> io::Result<()> {
    write_yaml(writer, report)
}

fn write_yaml<W: Write, T: serde::Serialize>(writer: &mut W, value: &T) -> io::Result<()> {
    let yaml =
        serde_yaml::to_string(value).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    writer.write_all(yaml.as_bytes())
}
