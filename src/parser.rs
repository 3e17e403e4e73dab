use nom::bytes::complete::{take_till1, take_while};
use nom::character::complete::char;
use nom::multi::{many0, separated_list0};
use nom::sequence::{preceded, terminated};
use nom::IResult;

const ATTRIBUTE_SEPARATOR: char = ';';
const KEY_VALUE_SEPARATOR: char = '=';

// lookups are substring matches on the raw segment, `mentions("ID")` is true for `Dbxref=dbSNP_ID42`
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Attribute<'a> {
    segment: &'a str,
}

impl<'a> Attribute<'a> {
    pub(crate) fn new(segment: &'a str) -> Self {
        Self { segment }
    }

    pub fn segment(&self) -> &'a str {
        self.segment
    }

    pub fn key(&self) -> &'a str {
        self.segment
            .split_once(KEY_VALUE_SEPARATOR)
            .map_or(self.segment, |(key, _)| key)
    }

    // whole segment when there is no `=`
    pub fn value(&self) -> &'a str {
        self.segment
            .rsplit_once(KEY_VALUE_SEPARATOR)
            .map_or(self.segment, |(_, value)| value)
    }

    pub fn mentions(&self, name: &str) -> bool {
        self.segment.contains(name)
    }
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

fn column(input: &str) -> IResult<&str, &str> {
    take_till1(char::is_whitespace)(input)
}

pub(crate) fn columns(input: &str) -> IResult<&str, Vec<&str>> {
    terminated(many0(preceded(whitespace, column)), whitespace)(input)
}

fn segments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(
        char(ATTRIBUTE_SEPARATOR),
        take_while(|c: char| c != ATTRIBUTE_SEPARATOR),
    )(input)
}

pub(crate) fn attributes(input: &str) -> IResult<&str, Vec<Attribute>> {
    let (input, segments) = segments(input)?;
    Ok((
        input,
        segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .map(Attribute::new)
            .collect(),
    ))
}

/// Empty segments are dropped, duplicates are kept in column order.
pub fn decode_attributes(column: &str) -> Vec<Attribute> {
    attributes(column)
        .map(|(_, attributes)| attributes)
        .unwrap_or_default()
}
