use itertools::Itertools;
use log::trace;

use crate::error::ParseError;
use crate::parser::{attributes, columns, Attribute};
use crate::types::{FormatTag, ParsedLine, VariantRecord, CHROM_PREFIX, MISSING, UNKNOWN_REF};

const COMMENT: char = '#';
// chrom, source, type, pos and an attribute column distinct from pos
const MIN_COLUMNS: usize = 5;
const CHROM_COLUMN: usize = 0;
const TYPE_COLUMN: usize = 2;
const POS_COLUMN: usize = 3;

const SAMPLE_TAG: &str = "ID";
const REFERENCE_TAG: &str = "Reference_seq";
const VARIANT_TAG: &str = "Variant_seq";
const CNV_TAG: &str = "CNVType";
const SV_TAG: &str = "SVType";

const MISSING_REF: [&str; 2] = ["-", "~"];
const MISSING_ALT: [&str; 3] = [".", "-", "~"];
const ALLELE_SEPARATOR: char = ',';

/// Parses lines of one input source, whose format is fixed for the lifetime of the normalizer.
///
/// # Examples
///
/// ```
/// use gvf_convert::{FormatTag, LineNormalizer};
///
/// let normalizer = LineNormalizer::new(FormatTag::Gff3);
/// let record = normalizer
///     .normalize("2\t.\tdeletion\t500\t600\t.\t.\t.\tSVType=DEL", 1)
///     .unwrap()
///     .record()
///     .unwrap();
/// assert_eq!(record.chrom(), "chr2");
/// assert_eq!(record.alt_base(), "<deletion>");
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LineNormalizer {
    format: FormatTag,
}

impl LineNormalizer {
    pub fn new(format: FormatTag) -> Self {
        Self { format }
    }

    pub fn format(&self) -> FormatTag {
        self.format
    }

    pub fn normalize(&self, line: &str, line_number: usize) -> Result<ParsedLine, ParseError> {
        parse_line(line, self.format, line_number)
    }
}

/// Whether `line` is a comment, i.e. its first non-whitespace character is `#`.
pub fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT)
}

/// Turn one line into a [`VariantRecord`] numbered `line_number`, or [`ParsedLine::Ignored`]
/// for comments.
///
/// # Examples
///
/// ```
/// use gvf_convert::{parse_line, FormatTag};
///
/// let line = "chr1\t.\t.\t12345\t.\t.\t.\t.\tID=sample1;Reference_seq=A;Variant_seq=T";
/// let record = parse_line(line, FormatTag::Gvf, 2).unwrap().record().unwrap();
/// assert_eq!(record.ref_base(), "A");
/// assert_eq!(record.alt_base(), "T");
/// assert_eq!(record.sample_id(), "sample1");
/// assert_eq!(*record.var_no(), 2);
///
/// assert!(parse_line("##gvf-version 1.10", FormatTag::Gvf, 3).unwrap().is_ignored());
/// ```
pub fn parse_line(
    line: &str,
    format: FormatTag,
    line_number: usize,
) -> Result<ParsedLine, ParseError> {
    if is_comment(line) {
        trace!("line {}: comment", line_number);
        return Ok(ParsedLine::Ignored);
    }

    let cols = columns(line).map(|(_, cols)| cols).unwrap_or_default();
    if cols.len() < MIN_COLUMNS {
        return Err(ParseError::TooFewColumns {
            line: line_number,
            found: cols.len(),
            expected: MIN_COLUMNS,
            text: line.to_owned(),
        });
    }

    // checked above, so the last column exists
    let attribute_column = cols[cols.len() - 1];
    let attrs = attributes(attribute_column)
        .map(|(_, attrs)| attrs)
        .unwrap_or_default();
    if attrs.is_empty() {
        return Err(ParseError::EmptyAttributes {
            line: line_number,
            column: attribute_column.to_owned(),
            text: line.to_owned(),
        });
    }

    let alleles = match format {
        FormatTag::Gvf => Alleles::from_gvf(&attrs),
        FormatTag::Gff | FormatTag::Gff3 => Alleles::from_gff(cols[TYPE_COLUMN], &attrs)
            .map_err(|tag| ParseError::MisplacedVariantType {
                line: line_number,
                tag,
                text: line.to_owned(),
            })?,
    };

    Ok(ParsedLine::Record(VariantRecord {
        chrom: normalize_chrom(cols[CHROM_COLUMN]),
        pos: cols[POS_COLUMN].to_owned(),
        ref_base: alleles.ref_base,
        alt_base: alleles.alt_base,
        sample_id: alleles.sample_id,
        var_no: line_number,
    }))
}

fn normalize_chrom(chrom: &str) -> String {
    if chrom.starts_with(CHROM_PREFIX) {
        chrom.to_owned()
    } else {
        format!("{}{}", CHROM_PREFIX, chrom)
    }
}

fn or_missing(value: &str) -> String {
    if value.is_empty() {
        MISSING.to_owned()
    } else {
        value.to_owned()
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Alleles {
    ref_base: String,
    alt_base: String,
    sample_id: String,
}

impl Default for Alleles {
    fn default() -> Self {
        Self {
            ref_base: MISSING.to_owned(),
            alt_base: MISSING.to_owned(),
            sample_id: MISSING.to_owned(),
        }
    }
}

impl Alleles {
    /// Scan all attributes in order; a later matching segment overwrites an earlier one, and one
    /// segment may set several fields.
    fn from_gvf(attrs: &[Attribute]) -> Self {
        let mut alleles = Alleles::default();
        for attr in attrs {
            let value = attr.value();
            if attr.mentions(SAMPLE_TAG) {
                alleles.sample_id = or_missing(value);
            }
            if attr.mentions(REFERENCE_TAG) {
                alleles.ref_base = if MISSING_REF.contains(&value) {
                    MISSING.to_owned()
                } else {
                    or_missing(value)
                };
            }
            if attr.mentions(VARIANT_TAG) {
                // multiple alleles are concatenated, `A,T` becomes `AT`
                alleles.alt_base = if MISSING_ALT.contains(&value) {
                    MISSING.to_owned()
                } else {
                    or_missing(&value.split(ALLELE_SEPARATOR).join(""))
                };
            }
        }
        alleles
    }

    /// The type tag is read from the last attribute only, the copy number from the first.
    /// Returns the offending tag when it appears in an earlier attribute instead.
    fn from_gff(feature_type: &str, attrs: &[Attribute]) -> Result<Self, &'static str> {
        let mut alleles = Alleles {
            ref_base: UNKNOWN_REF.to_owned(),
            ..Alleles::default()
        };
        let (first, last) = match (attrs.first(), attrs.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Ok(alleles),
        };

        if last.mentions(CNV_TAG) {
            alleles.alt_base = format!("<CNV_{}>", first.value());
        } else if last.mentions(SV_TAG) {
            alleles.alt_base = format!("<{}>", feature_type);
        } else if let Some(tag) = [CNV_TAG, SV_TAG]
            .iter()
            .copied()
            .find(|tag| attrs.iter().any(|attr| attr.mentions(tag)))
        {
            return Err(tag);
        }
        Ok(alleles)
    }
}
