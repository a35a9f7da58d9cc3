use std::path::PathBuf;

/// What a command did, as shown in the run summary.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub command: &'static str,
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub input_rows: usize,
    pub output_rows: usize,
    pub attributes: usize,
    pub total_weight: f64,
    /// Conditions worth reporting that did not fail the run.
    pub notes: Vec<String>,
}

impl RunReport {
    pub fn new(command: &'static str, inputs: Vec<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            command,
            inputs,
            output,
            ..Self::default()
        }
    }
}
