use crate::error::{FfResult, FingerForgeError};
use crate::notes::NoteEvent;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassageFormat {
    Csv,
    Json,
}

impl PassageFormat {
    pub fn from_path(path: &Path) -> FfResult<Self> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()) {
            Some(ext) if ext == "csv" => Ok(Self::Csv),
            Some(ext) if ext == "json" => Ok(Self::Json),
            _ => Err(FingerForgeError::Config(format!(
                "Cannot infer passage format of '{}' (expected .csv or .json)",
                path.display()
            ))),
        }
    }
}

/// Reads note events from a header-led CSV. Only `x` and `time` are required.
pub fn read_csv<R: Read>(reader: R) -> FfResult<Vec<NoteEvent>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut events = Vec::new();
    for result in rdr.deserialize() {
        let ev: NoteEvent = result?;
        events.push(ev);
    }
    Ok(events)
}

pub fn read_json<R: Read>(reader: R) -> FfResult<Vec<NoteEvent>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn write_csv<W: Write>(writer: W, events: &[NoteEvent]) -> FfResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for ev in events {
        wtr.serialize(ev)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, events: &[NoteEvent]) -> FfResult<()> {
    serde_json::to_writer_pretty(writer, events)?;
    Ok(())
}

pub fn load_passage<P: AsRef<Path>>(path: P) -> FfResult<Vec<NoteEvent>> {
    let path = path.as_ref();
    let format = PassageFormat::from_path(path)?;
    info!("📂 Loading passage: {}", path.display());

    let reader = BufReader::new(File::open(path)?);
    let events = match format {
        PassageFormat::Csv => read_csv(reader)?,
        PassageFormat::Json => read_json(reader)?,
    };
    debug!("   {} note events read", events.len());
    Ok(events)
}

pub fn save_passage<P: AsRef<Path>>(path: P, events: &[NoteEvent]) -> FfResult<()> {
    let path = path.as_ref();
    let format = PassageFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        PassageFormat::Csv => write_csv(&mut writer, events)?,
        PassageFormat::Json => write_json(&mut writer, events)?,
    }
    writer.flush()?;
    info!("💾 Wrote {} fingered events to {}", events.len(), path.display());
    Ok(())
}
