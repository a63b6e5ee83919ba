//! OCR engine abstraction and the Tesseract implementation.
//!
//! Tesseract runs as a system binary; each recognition is a fresh
//! process, so a discarded attempt never leaks state into a later call.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use crate::error::ExtractError;

/// Raw output of one engine run over one image.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub text: String,
    /// Self-reported accuracy estimate in [0, 100], if the engine
    /// provides one.
    pub confidence: Option<f32>,
}

/// A blocking OCR engine recognizing a single image.
///
/// Seam for tests: batch and timeout semantics in the orchestrator are
/// exercised against stub engines without a tesseract install.
pub trait OcrEngine: Send + Sync + 'static {
    fn recognize(&self, image: &[u8]) -> Result<EngineOutput, ExtractError>;

    /// Whether the engine can run at all on this host.
    fn is_available(&self) -> bool {
        true
    }
}

/// Tesseract invoked in TSV mode, which carries per-word confidence
/// alongside the recognized text.
pub struct TesseractEngine {
    /// Tesseract language set, e.g. `eng+deu+fra+ita`.
    languages: String,
}

impl TesseractEngine {
    pub fn new(languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
        }
    }

    fn run_tesseract(&self, image_path: &Path) -> Result<EngineOutput, ExtractError> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.languages])
            .arg("tsv")
            .output();

        match output {
            Ok(output) => {
                if output.status.success() {
                    Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Err(ExtractError::OcrFailed(format!(
                        "tesseract failed: {}",
                        stderr.trim()
                    )))
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ExtractError::EngineNotAvailable(
                    "tesseract not found (install tesseract-ocr)".to_string(),
                ))
            }
            Err(e) => Err(ExtractError::Io(e)),
        }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image: &[u8]) -> Result<EngineOutput, ExtractError> {
        // Tesseract wants a file path; leptonica detects the image
        // format from content, not the extension.
        let temp_dir = TempDir::new()?;
        let image_path = temp_dir.path().join("page.img");
        std::fs::write(&image_path, image)?;
        self.run_tesseract(&image_path)
    }

    fn is_available(&self) -> bool {
        which::which("tesseract").is_ok()
    }
}

/// Rebuild line text and mean word confidence from tesseract's TSV
/// output. Word rows are level 5; a confidence of -1 marks non-word
/// rows and is excluded from the mean.
fn parse_tsv(tsv: &str) -> EngineOutput {
    let mut text = String::new();
    let mut current_line: Option<(u32, u32, u32)> = None;
    let mut conf_sum = 0.0f32;
    let mut conf_count = 0usize;

    for row in tsv.lines().skip(1) {
        let cols: Vec<&str> = row.split('\t').collect();
        if cols.len() < 12 || cols[0] != "5" {
            continue;
        }
        let word = cols[11].trim();
        if word.is_empty() {
            continue;
        }

        let line_key = (
            cols[2].parse().unwrap_or(0),
            cols[3].parse().unwrap_or(0),
            cols[4].parse().unwrap_or(0),
        );
        match current_line {
            Some(key) if key == line_key => text.push(' '),
            Some(_) => text.push('\n'),
            None => {}
        }
        current_line = Some(line_key);
        text.push_str(word);

        if let Ok(conf) = cols[10].parse::<f32>() {
            if conf >= 0.0 {
                conf_sum += conf;
                conf_count += 1;
            }
        }
    }

    let confidence = if conf_count > 0 {
        Some(conf_sum / conf_count as f32)
    } else {
        None
    };

    EngineOutput { text, confidence }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "level\tpage_num\tblock_num\tpar_num\tline_num\tword_num\tleft\ttop\twidth\theight\tconf\ttext";

    #[test]
    fn test_parse_tsv_words_and_lines() {
        let tsv = format!(
            "{}\n\
             1\t1\t0\t0\t0\t0\t0\t0\t100\t100\t-1\t\n\
             5\t1\t1\t1\t1\t1\t0\t0\t10\t10\t96.5\tJane\n\
             5\t1\t1\t1\t1\t2\t12\t0\t10\t10\t93.5\tDoe\n\
             5\t1\t1\t1\t2\t1\t0\t12\t10\t10\t90.0\tEngineer\n",
            HEADER
        );
        let out = parse_tsv(&tsv);
        assert_eq!(out.text, "Jane Doe\nEngineer");
        let conf = out.confidence.unwrap();
        assert!((conf - 93.333_336).abs() < 0.01);
    }

    #[test]
    fn test_parse_tsv_no_words() {
        let out = parse_tsv(&format!("{}\n1\t1\t0\t0\t0\t0\t0\t0\t1\t1\t-1\t\n", HEADER));
        assert_eq!(out.text, "");
        assert!(out.confidence.is_none());
    }
}
