//! Marker-delimited region replacement.
//!
//! Markers are located by plain substring search on whole lines, so marker
//! text never needs escaping.

use crate::error::{Error, Result};

/// Line indices of the two marker lines in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub start_line: usize,
    pub end_line: usize,
}

/// Find the first line containing `start_marker` and the first later line
/// containing `end_marker`.
pub fn locate(document: &str, start_marker: &str, end_marker: &str) -> Result<Region> {
    let lines: Vec<&str> = document.split_inclusive('\n').collect();
    find_region(&lines, start_marker, end_marker)
}

/// Replace everything between the marker lines with `replacement`.
///
/// Both marker lines and all text outside them are kept byte-for-byte. The
/// replacement is terminated with the start marker line's line ending.
pub fn splice(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Result<String> {
    let lines: Vec<&str> = document.split_inclusive('\n').collect();
    let region = find_region(&lines, start_marker, end_marker)?;

    let crlf = lines[region.start_line].ends_with("\r\n");
    let eol = if crlf { "\r\n" } else { "\n" };

    let mut out = String::with_capacity(document.len() + replacement.len());
    for line in &lines[..=region.start_line] {
        out.push_str(line);
    }
    if crlf {
        out.push_str(&replacement.lines().collect::<Vec<_>>().join(eol));
    } else {
        out.push_str(replacement);
    }
    out.push_str(eol);
    for line in &lines[region.end_line..] {
        out.push_str(line);
    }

    Ok(out)
}

fn find_region(lines: &[&str], start_marker: &str, end_marker: &str) -> Result<Region> {
    let start_line = lines
        .iter()
        .position(|line| line.contains(start_marker))
        .ok_or_else(|| Error::MarkerNotFound {
            marker: start_marker.to_string(),
        })?;

    let end_line = lines[start_line + 1..]
        .iter()
        .position(|line| line.contains(end_marker))
        .map(|offset| start_line + 1 + offset)
        .ok_or_else(|| {
            let marker = end_marker.to_string();
            if shares_start_line(lines[start_line], start_marker, end_marker) {
                Error::MarkerOnStartLine { marker }
            } else {
                Error::MarkerNotFound { marker }
            }
        })?;

    Ok(Region {
        start_line,
        end_line,
    })
}

/// Whether `end_marker` follows `start_marker` on the same line.
fn shares_start_line(line: &str, start_marker: &str, end_marker: &str) -> bool {
    line.find(start_marker)
        .is_some_and(|at| line[at + start_marker.len()..].contains(end_marker))
}
