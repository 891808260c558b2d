//! Helpers for running poppler command line tools over in-memory PDFs.

use crate::error::ListamatError;
use std::io::Write;
use std::path::Path;
use std::process::Command;

pub const PDFTOTEXT: &str = "pdftotext";
pub const PDFINFO: &str = "pdfinfo";

/// Write PDF bytes to a temporary file that lives as long as the handle.
pub fn write_temp_pdf(pdf_bytes: &[u8]) -> Result<tempfile::NamedTempFile, ListamatError> {
    let mut tmpfile = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .map_err(|e| ListamatError::Extraction(e.to_string()))?;
    tmpfile
        .write_all(pdf_bytes)
        .map_err(|e| ListamatError::Extraction(e.to_string()))?;
    tmpfile
        .flush()
        .map_err(|e| ListamatError::Extraction(e.to_string()))?;
    Ok(tmpfile)
}

/// Run a poppler tool and return its stdout.
pub fn run_tool(
    tool: &'static str,
    args: &[&str],
    pdf_path: &Path,
) -> Result<Vec<u8>, ListamatError> {
    tracing::trace!(tool, ?args, "running poppler tool");

    let output = Command::new(tool)
        .args(args)
        .arg(pdf_path)
        .arg("-") // output to stdout
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ListamatError::ToolNotFound { tool }
            } else {
                ListamatError::Extraction(format!("{tool} failed: {e}"))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ListamatError::ToolFailed { tool, code, stderr });
    }

    Ok(output.stdout)
}

/// Number of pages reported by `pdfinfo`.
pub fn page_count(pdf_path: &Path) -> Result<usize, ListamatError> {
    // pdfinfo takes no output argument; "-" would be read as a second file.
    let output = Command::new(PDFINFO)
        .arg(pdf_path)
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ListamatError::ToolNotFound { tool: PDFINFO }
            } else {
                ListamatError::Extraction(format!("{PDFINFO} failed: {e}"))
            }
        })?;

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ListamatError::ToolFailed {
            tool: PDFINFO,
            code,
            stderr,
        });
    }

    parse_page_count(&String::from_utf8_lossy(&output.stdout)).ok_or_else(|| {
        ListamatError::Extraction(format!("{PDFINFO} did not report a page count"))
    })
}

fn parse_page_count(info: &str) -> Option<usize> {
    info.lines()
        .find_map(|line| line.strip_prefix("Pages:"))
        .and_then(|rest| rest.trim().parse().ok())
}
