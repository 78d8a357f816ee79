//! `encode` and `decode` commands: convert between rule files and flat records.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};

use fieldsub_core::{RuleSetRecord, SubstitutionEngine, TransformationConfig};

use crate::cli::{DecodeCommand, EncodeCommand, RecordFormat};
use crate::commands::info_msg;

pub fn run_encode(cmd: &EncodeCommand, quiet: bool) -> Result<()> {
    let config = TransformationConfig::load_from_file(&cmd.rules)?;
    let engine = config.build_engine()?;
    let bytes = encode_record(&engine.to_record(), cmd.format)?;
    debug!("Encoded {} rule(s) into {} byte(s).", engine.len(), bytes.len());

    match &cmd.output {
        Some(path) => {
            if !quiet {
                info_msg(format!("Writing record to file: {}", path.display()));
            }
            fs::write(path, &bytes)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            writer.write_all(&bytes)?;
            writer.flush()?;
        }
    }
    Ok(())
}

pub fn run_decode(cmd: &DecodeCommand) -> Result<()> {
    let bytes = match &cmd.input {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).context("Failed to read record from stdin")?;
            buf
        }
    };

    let engine = decode_engine(&bytes, cmd.format)?;
    info!("Decoded and validated {} rule(s).", engine.len());

    let yaml = TransformationConfig::from_engine(&engine).to_yaml_string()?;
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    write!(writer, "{}", yaml)?;
    Ok(())
}

pub fn encode_record(record: &RuleSetRecord, format: RecordFormat) -> Result<Vec<u8>> {
    let bytes = match format {
        RecordFormat::Json => {
            let mut s = record.to_json()?;
            s.push('\n');
            s.into_bytes()
        }
        RecordFormat::Yaml => record.to_yaml()?.into_bytes(),
        RecordFormat::Bin => record.to_bytes()?,
    };
    Ok(bytes)
}

/// Parses a record and rebuilds the engine through the builder.
pub fn decode_engine(bytes: &[u8], format: RecordFormat) -> Result<SubstitutionEngine> {
    let record = match format {
        RecordFormat::Json => RuleSetRecord::from_json(text(bytes)?)?,
        RecordFormat::Yaml => RuleSetRecord::from_yaml(text(bytes)?)?,
        RecordFormat::Bin => RuleSetRecord::from_bytes(bytes)?,
    };
    let engine = SubstitutionEngine::from_record(record).context("Rejected rule record")?;
    Ok(engine)
}

fn text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).context("Record is not valid UTF-8")
}
