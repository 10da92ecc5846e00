//! File processor - runs the line rewriter over a whole G-code file
//!
//! The input is read fully into memory, rewritten line by line, and written
//! out in one go. Nothing is written if any line fails to rewrite.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::rewrite::{LineRewriter, SELECT_COMMAND, SessionState};

/// Slicer comment marking the end of the machine start sequence
pub const START_GCODE_MARKER: &str = "; start_gcode_end";

/// Suffix appended to the input stem when no output path is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_revolver";

/// Rewritten lines plus what happened while producing them
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    /// Output lines, without line endings
    pub lines: Vec<String>,
    /// Selection commands emitted, initialization blocks included
    pub selections: usize,
    /// Initialization blocks inserted after the start marker
    pub init_blocks: usize,
    /// Session state after the last line
    pub final_state: SessionState,
}

/// Summary of a file run, for reporting
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines_read: usize,
    pub lines_written: usize,
    pub selections: usize,
    pub init_blocks: usize,
}

/// Drives a [`LineRewriter`] across files
#[derive(Debug, Clone)]
pub struct FileProcessor {
    rewriter: LineRewriter,
    marker: String,
}

impl FileProcessor {
    pub fn new(rewriter: LineRewriter) -> Self {
        Self {
            rewriter,
            marker: START_GCODE_MARKER.to_string(),
        }
    }

    /// Use a different start-sequence marker
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn rewriter(&self) -> &LineRewriter {
        &self.rewriter
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Lines inserted after the start marker, and the state they leave behind
    pub fn init_block(&self) -> Result<(Vec<String>, SessionState)> {
        let profile = self.rewriter.nozzles().profile(0)?;
        let lines = vec![
            String::new(),
            "; OpenRevolver Initialization".to_string(),
            format!("{} NOZZLE=0 ; Start with standard nozzle", SELECT_COMMAND),
            format!("M104 S{} ; Set initial temp", profile.temp),
            String::new(),
        ];
        Ok((lines, SessionState::new(0, profile.temp)))
    }

    /// Rewrite a sequence of lines (without line endings)
    pub fn process_lines<'a, I>(&self, lines: I) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut state = SessionState::default();
        let mut out = Vec::new();
        let mut selections = 0;
        let mut init_blocks = 0;

        for (idx, line) in lines.into_iter().enumerate() {
            if line.contains(self.marker.as_str()) {
                let (block, init_state) = self.init_block()?;
                out.push(line.to_string());
                out.extend(block);
                state = init_state;
                selections += 1;
                init_blocks += 1;
                continue;
            }

            let rewrite = self.rewriter.rewrite(line, idx + 1, state)?;
            out.extend(rewrite.lines);
            selections += rewrite.selections;
            state = rewrite.state;
        }

        Ok(ProcessOutcome {
            lines: out,
            selections,
            init_blocks,
            final_state: state,
        })
    }

    /// Rewrite file content, keeping its line ending style
    pub fn process_str(&self, content: &str) -> Result<(String, ProcessOutcome)> {
        let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
        let outcome = self.process_lines(content.lines())?;

        let mut text = outcome.lines.join(newline);
        if !outcome.lines.is_empty() && content.ends_with('\n') {
            text.push_str(newline);
        }
        Ok((text, outcome))
    }

    /// Read `input`, rewrite it, and write the result to `output`
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<ProcessSummary> {
        info!("Processing {} -> {}", input.display(), output.display());

        let content = fs::read_to_string(input)?;
        let lines_read = content.lines().count();
        let (text, outcome) = self.process_str(&content)?;
        fs::write(output, text)?;

        info!(
            "Wrote {} lines, {} selection commands, {} init blocks",
            outcome.lines.len(),
            outcome.selections,
            outcome.init_blocks
        );

        Ok(ProcessSummary {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            lines_read,
            lines_written: outcome.lines.len(),
            selections: outcome.selections,
            init_blocks: outcome.init_blocks,
        })
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new(LineRewriter::default())
    }
}

/// `dir/part.gcode` -> `dir/part<suffix>.gcode`
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(name)
}
