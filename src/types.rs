use std::fmt;
use std::path::Path;
use std::str::FromStr;

use getset::Getters;
use serde::Serialize;
use strum::{Display, EnumString};

pub const MISSING: &str = "-";
// GFF/GFF3 cannot express a reference allele
pub const UNKNOWN_REF: &str = "!";

pub(crate) const CHROM_PREFIX: &str = "chr";

const COMPRESSION_EXTENSIONS: [&str; 2] = ["gz", "bgz"];

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, EnumString, Display, Serialize)]
pub enum FormatTag {
    #[strum(serialize = "gvf")]
    #[serde(rename = "gvf")]
    Gvf,
    #[strum(serialize = "gff")]
    #[serde(rename = "gff")]
    Gff,
    #[strum(serialize = "gff3")]
    #[serde(rename = "gff3")]
    Gff3,
}

impl FormatTag {
    // looks through a trailing .gz/.bgz
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        let extension = path.extension()?.to_str()?;
        let extension = if COMPRESSION_EXTENSIONS.contains(&extension) {
            Path::new(path.file_stem()?).extension()?.to_str()?
        } else {
            extension
        };
        FormatTag::from_str(extension).ok()
    }
}

/// Every field holds a real value or one of the sentinels [`MISSING`] and [`UNKNOWN_REF`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Getters, Serialize)]
#[getset(get = "pub")]
pub struct VariantRecord {
    pub(crate) chrom: String,
    // kept verbatim, upstream files use placeholder tokens here
    pub(crate) pos: String,
    pub(crate) ref_base: String,
    pub(crate) alt_base: String,
    pub(crate) sample_id: String,
    pub(crate) var_no: usize,
}

impl VariantRecord {
    pub(crate) const TSV_HEADER: [&'static str; 6] =
        ["chrom", "pos", "ref_base", "alt_base", "sample_id", "var_no"];

    pub fn tsv_header() -> String {
        Self::TSV_HEADER.join("\t")
    }
}

impl fmt::Display for VariantRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom, self.pos, self.ref_base, self.alt_base, self.sample_id, self.var_no
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParsedLine {
    Record(VariantRecord),
    Ignored,
}

impl ParsedLine {
    pub fn record(self) -> Option<VariantRecord> {
        match self {
            ParsedLine::Record(record) => Some(record),
            ParsedLine::Ignored => None,
        }
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, ParsedLine::Ignored)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FormatTag::from_path("a/b/calls.gvf"), Some(FormatTag::Gvf));
        assert_eq!(FormatTag::from_path("calls.gff"), Some(FormatTag::Gff));
        assert_eq!(FormatTag::from_path("calls.gff3"), Some(FormatTag::Gff3));
        assert_eq!(FormatTag::from_path("calls.gvf.bgz"), Some(FormatTag::Gvf));
        assert_eq!(FormatTag::from_path("calls.GVF"), None);
        assert_eq!(FormatTag::from_path("calls.gz"), None);
        assert_eq!(FormatTag::from_path("gvf"), None);
    }

    #[test]
    fn test_format_display_roundtrips_through_from_str() {
        for format in [FormatTag::Gvf, FormatTag::Gff, FormatTag::Gff3].iter() {
            assert_eq!(FormatTag::from_str(&format.to_string()).ok(), Some(*format));
        }
    }

    #[test]
    fn test_record_display() {
        let record = VariantRecord {
            chrom: "chr2".into(),
            pos: "500".into(),
            ref_base: UNKNOWN_REF.into(),
            alt_base: "<deletion>".into(),
            sample_id: MISSING.into(),
            var_no: 1,
        };
        assert_eq!(record.to_string(), "chr2\t500\t!\t<deletion>\t-\t1");
        assert_eq!(
            VariantRecord::tsv_header(),
            "chrom\tpos\tref_base\talt_base\tsample_id\tvar_no"
        );
    }
}
