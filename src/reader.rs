use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::anyhow;
use getset::{CopyGetters, Getters};
use log::debug;
use strum::{Display, EnumString};

use crate::error::{ParseError, ReadError};
use crate::normalizer::LineNormalizer;
use crate::types::{FormatTag, ParsedLine, VariantRecord};

#[derive(Debug, Clone, Copy, Eq, PartialEq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Numbering {
    Records,
    // physical 1-based line number
    Lines,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct ReaderOptions {
    numbering: Numbering,
    skip_blank_lines: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            numbering: Numbering::Records,
            skip_blank_lines: true,
        }
    }
}

impl ReaderOptions {
    pub fn with_numbering(mut self, numbering: Numbering) -> Self {
        self.numbering = numbering;
        self
    }

    pub fn with_skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Getters)]
#[getset(get = "pub")]
pub struct ReaderStats {
    lines: usize,
    records: usize,
    ignored: usize,
    malformed: usize,
}

pub fn detect<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.is_file() && FormatTag::from_path(path).is_some()
}

/// Comment lines (and blank lines, unless disabled) are skipped; malformed lines are yielded as
/// errors and the iteration continues after them.
pub struct VariantRecords<R: BufRead> {
    normalizer: LineNormalizer,
    options: ReaderOptions,
    stats: ReaderStats,
    line_buf: Vec<u8>,
    inner: R,
}

impl VariantRecords<Box<dyn BufRead>> {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let format = FormatTag::from_path(path)
            .ok_or_else(|| anyhow!("{} is not a gvf, gff or gff3 file", path.display()))?;
        Self::from_path_with_format(path, format)
    }

    pub fn from_path_with_format<P: AsRef<Path>>(
        path: P,
        format: FormatTag,
    ) -> anyhow::Result<Self> {
        let (reader, _compression) = niffler::from_path(path)?;
        Ok(Self::new(Box::new(BufReader::new(reader)), format))
    }
}

impl<R: BufRead> VariantRecords<R> {
    pub fn new(reader: R, format: FormatTag) -> Self {
        Self::with_options(reader, format, ReaderOptions::default())
    }

    pub fn with_options(reader: R, format: FormatTag, options: ReaderOptions) -> Self {
        Self {
            normalizer: LineNormalizer::new(format),
            options,
            stats: ReaderStats::default(),
            line_buf: Vec::new(),
            inner: reader,
        }
    }

    pub fn with_reader_options(mut self, options: ReaderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> FormatTag {
        self.normalizer.format()
    }

    pub fn stats(&self) -> &ReaderStats {
        &self.stats
    }

    fn next_number(&self) -> usize {
        match self.options.numbering {
            // malformed lines take a number as well, so records keep their input order
            Numbering::Records => self.stats.records + self.stats.malformed + 1,
            Numbering::Lines => self.stats.lines,
        }
    }
}

impl<R: BufRead> Iterator for VariantRecords<R> {
    type Item = Result<VariantRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buf.clear();
            match self.inner.read_until(b'\n', &mut self.line_buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.stats.lines += 1;
            let number = self.next_number();

            let line = match std::str::from_utf8(&self.line_buf) {
                Ok(line) => line.trim_end_matches(|c: char| c == '\n' || c == '\r'),
                Err(_) => {
                    let text = String::from_utf8_lossy(&self.line_buf)
                        .trim_end_matches(|c: char| c == '\n' || c == '\r')
                        .to_owned();
                    let e = ParseError::InvalidUtf8 { line: number, text };
                    debug!("skipping malformed line {}: {}", self.stats.lines, e);
                    self.stats.malformed += 1;
                    return Some(Err(e.into()));
                }
            };

            if self.options.skip_blank_lines && line.trim().is_empty() {
                self.stats.ignored += 1;
                continue;
            }

            match self.normalizer.normalize(line, number) {
                Ok(ParsedLine::Record(record)) => {
                    self.stats.records += 1;
                    return Some(Ok(record));
                }
                Ok(ParsedLine::Ignored) => {
                    self.stats.ignored += 1;
                }
                Err(e) => {
                    debug!("skipping malformed line {}: {}", self.stats.lines, e);
                    self.stats.malformed += 1;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
