//! CSV table writer.

use std::path::Path;

use ::csv::{QuoteStyle, StringRecord, WriterBuilder};

use super::{stage, StagedOutput};
use crate::error::{Result, RoadnetError};

/// Write records (header first) as a delimited table.
///
/// Rows keep their own width; quoting is applied only where a field needs it.
pub fn write_records<'a, I>(path: &Path, records: I) -> Result<()>
where
    I: IntoIterator<Item = &'a StringRecord>,
{
    stage_records(path, records)?.commit()
}

/// Like [`write_records`], leaving the table staged for a later commit.
pub fn stage_records<'a, I>(path: &Path, records: I) -> Result<StagedOutput>
where
    I: IntoIterator<Item = &'a StringRecord>,
{
    stage(path, |out| {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .quote_style(QuoteStyle::Necessary)
            .from_writer(out);
        for record in records {
            writer
                .write_record(record)
                .map_err(|e| RoadnetError::file_access(path, e))?;
        }
        writer.flush().map_err(|e| RoadnetError::file_access(path, e))
    })
}
