//! Write the generated emails to a CSV file.
//!
//! Output path is `{dir}/{owner}-{repo}-emails.csv`; the directory is
//! created if absent and an existing file is overwritten. Quoting is strict:
//! a field containing a comma, a double quote, or a line break is wrapped in
//! double quotes with embedded quotes doubled, so the file re-parses to the
//! original tuples. No timestamps are embedded; identical input produces
//! byte-identical output.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::model::{Email, Trigger};
use crate::workflow::{Step, StepId, StepOutput, StepResults, WorkflowError};

const CSV_HEADER: &str = "Name,Email,Subject,Body\n";

pub struct WriteCsv {
    output_dir: PathBuf,
}

impl WriteCsv {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

#[async_trait]
impl Step for WriteCsv {
    fn id(&self) -> StepId {
        StepId::WriteCsv
    }

    async fn execute(
        &self,
        trigger: &Trigger,
        results: &StepResults,
    ) -> Result<StepOutput, WorkflowError> {
        let content = to_csv(results.emails());
        let path = self
            .output_dir
            .join(format!("{}-{}-emails.csv", trigger.owner, trigger.repo));

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::write(&path, content).await?;

        info!(path = %path.display(), emails = results.emails().len(), "csv written");
        Ok(StepOutput::CsvWritten { path })
    }
}

/// Serialize emails to CSV text, header included.
pub fn to_csv(emails: &[Email]) -> String {
    let rows = emails
        .iter()
        .map(|email| {
            format!(
                "{},{},{},{}",
                escape_field(&email.name),
                escape_field(&email.email),
                escape_field(&email.subject),
                escape_field(&email.body)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("{CSV_HEADER}{rows}")
}

/// Quote a field when it contains a comma, quote, or line break; double any
/// embedded quotes.
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
