use crate::domain::model::SamplePoint;
use crate::utils::error::Result;
use std::io::Write;
use std::path::Path;

/// Writes `x,y` rows to any writer.
pub fn write_points_csv<W: Write>(writer: W, points: &[SamplePoint]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in points {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_points_csv<P: AsRef<Path>>(path: P, points: &[SamplePoint]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    write_points_csv(file, points)?;
    tracing::info!("📁 Exported {} points to {}", points.len(), path.display());
    Ok(())
}
