use crate::foundation::error::{ReelError, ReelResult};

/// Outcome of a batch job that keeps going past per-item failures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    job: &'static str,
    succeeded: Vec<String>,
    failed: Vec<(String, String)>,
}

impl BatchReport {
    pub fn new(job: &'static str) -> Self {
        Self {
            job,
            ..Self::default()
        }
    }

    /// Record the result of one item, logging failures with the item id.
    pub fn record<T>(&mut self, id: &str, res: ReelResult<T>) -> Option<T> {
        match res {
            Ok(v) => {
                self.succeeded.push(id.to_owned());
                Some(v)
            }
            Err(e) => {
                tracing::error!(job = self.job, item = id, error = %e, "item failed");
                self.failed.push((id.to_owned(), e.to_string()));
                None
            }
        }
    }

    pub fn job(&self) -> &'static str {
        self.job
    }

    pub fn succeeded(&self) -> &[String] {
        &self.succeeded
    }

    /// Failed item ids with their error messages.
    pub fn failed(&self) -> &[(String, String)] {
        &self.failed
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Log the closing summary line.
    pub fn log_summary(&self) {
        if self.is_clean() {
            tracing::info!(job = self.job, succeeded = self.succeeded.len(), "batch finished");
        } else {
            tracing::warn!(
                job = self.job,
                succeeded = self.succeeded.len(),
                failed = self.failed.len(),
                "batch finished with failures"
            );
        }
    }

    /// Turn a report with failures into an error listing the failed ids.
    pub fn into_result(self) -> ReelResult<Self> {
        if self.is_clean() {
            return Ok(self);
        }
        let ids: Vec<&str> = self.failed.iter().map(|(id, _)| id.as_str()).collect();
        Err(ReelError::process(format!(
            "{}: {} of {} items failed ({})",
            self.job,
            self.failed.len(),
            self.failed.len() + self.succeeded.len(),
            ids.join(", ")
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/batch.rs"]
mod tests;
