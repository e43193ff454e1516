//! Writing the match set out

use keyscan_api::{ProgramPoint, Result, ResultExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write one line per match, ascending
///
/// Each line is `caller pc context` as zero-padded 16-digit hex.
pub fn write_matches<'a, I, W>(matches: I, mut writer: W) -> Result<()>
where
    I: IntoIterator<Item = &'a ProgramPoint>,
    W: Write,
{
    let mut sorted: Vec<&ProgramPoint> = matches.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();
    for point in sorted {
        writeln!(writer, "{}", point).with_context("match report")?;
    }
    writer.flush().with_context("match report")
}

/// Create `path` and write the match report into it
pub fn write_match_file<'a, I>(path: impl AsRef<Path>, matches: I) -> Result<()>
where
    I: IntoIterator<Item = &'a ProgramPoint>,
{
    let file = File::create(path).with_context("match report file")?;
    write_matches(matches, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_are_sorted_and_padded() {
        let points = [
            ProgramPoint::new(0x9, 0x9, 0x9),
            ProgramPoint::new(0x1, 0x2, 0x3),
            ProgramPoint::new(0x1, 0x2, 0x3),
        ];
        let mut out = Vec::new();
        write_matches(&points, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0000000000000001 0000000000000002 0000000000000003\n\
             0000000000000009 0000000000000009 0000000000000009\n"
        );
    }

    #[test]
    fn test_empty_report() {
        let mut out = Vec::new();
        write_matches(std::iter::empty::<&ProgramPoint>(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_report_file() {
        let path = std::env::temp_dir().join(format!(
            "keyscan-report-{}.txt",
            std::process::id()
        ));
        let point = ProgramPoint::new(u64::MAX, 0, 0xabc);
        write_match_file(&path, [&point]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(text, "ffffffffffffffff 0000000000000000 0000000000000abc\n");
    }
}
