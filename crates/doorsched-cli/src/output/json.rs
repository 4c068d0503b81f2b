use doorsched_core::error::ScheduleError;
use doorsched_core::model::Record;

pub fn render(records: &[Record]) -> Result<String, ScheduleError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// One JSON object per line.
pub fn render_lines(records: &[Record]) -> Result<String, ScheduleError> {
    let lines = records
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
