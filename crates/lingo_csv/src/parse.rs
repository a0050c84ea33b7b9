//! Splitting comma-separated text into rows of cells
//!

use winnow::ascii::line_ending;
use winnow::combinator::{alt, cut_err, eof, preceded, repeat, separated, terminated};
use winnow::prelude::*;
use winnow::token::take_till;
use winnow::PResult;

use crate::error::{Error, Result};

const BYTE_ORDER_MARK: char = '\u{feff}';

fn quoted_field(input: &mut &str) -> PResult<String> {
    preceded(
        '"',
        cut_err(terminated(
            repeat(
                0..,
                alt((take_till(1.., '"'), "\"\"".map(|_| "\""))),
            )
            .fold(String::new, |mut acc: String, part: &str| {
                acc.push_str(part);
                acc
            }),
            '"',
        )),
    )
    .parse_next(input)
}

fn plain_field(input: &mut &str) -> PResult<String> {
    take_till(0.., [',', '\r', '\n'])
        .map(String::from)
        .parse_next(input)
}

fn field(input: &mut &str) -> PResult<String> {
    alt((quoted_field, plain_field)).parse_next(input)
}

fn record(input: &mut &str) -> PResult<Vec<String>> {
    terminated(separated(1.., field, ','), alt((line_ending, eof))).parse_next(input)
}

fn is_blank(row: &[String]) -> bool {
    matches!(row, [only] if only.is_empty())
}

/// Split `text` into rows of cells.
///
/// A leading byte order mark is ignored, as are blank lines.
pub fn parse_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let mut input = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let mut rows = Vec::new();
    let mut line = 0;

    while !input.is_empty() {
        let row = record
            .parse_next(&mut input)
            .map_err(|_| Error::MalformedRow { row: line })?;
        line += 1;

        if !is_blank(&row) {
            rows.push(row);
        }
    }

    Ok(rows)
}
