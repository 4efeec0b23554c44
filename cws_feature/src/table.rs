//! Readers and writers of the text tables.
//!
//! All writers emit `\n` line endings and never flush; callers own the sink and flush it.

use std::io::{BufRead, Write};

use crate::corpus::TokenizedLine;
use crate::encoder::{AnnotatedLine, EncodedExample, Encoder};
use crate::errors::{CwsError, Result};
use crate::normalize::trim_line;
use crate::tag::{Tag, TagScheme};
use crate::vocabulary::FeatureVocabulary;

/// Writes one entry per line. Used for the unigram and bigram tables.
pub fn write_list<W, I, S>(wtr: &mut W, entries: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for entry in entries {
        writeln!(wtr, "{}", entry.as_ref())?;
    }
    Ok(())
}

fn write_header<W>(wtr: &mut W, size: usize) -> Result<()>
where
    W: Write,
{
    write!(wtr, "{size}\n\n")?;
    Ok(())
}

/// Writes `<key>\t<index>` lines, optionally preceded by the number of entries and a blank line.
pub fn write_index_table<'a, W, I>(wtr: &mut W, entries: I, header: bool) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, u32)>,
    I::IntoIter: ExactSizeIterator,
{
    let entries = entries.into_iter();
    if header {
        write_header(wtr, entries.len())?;
    }
    for (key, index) in entries {
        writeln!(wtr, "{key}\t{index}")?;
    }
    Ok(())
}

/// Writes the feature index table.
pub fn write_feature_index<W>(
    wtr: &mut W,
    vocabulary: &FeatureVocabulary,
    header: bool,
) -> Result<()>
where
    W: Write,
{
    write_index_table(wtr, vocabulary.iter().collect::<Vec<_>>(), header)
}

/// Writes the label index table.
pub fn write_tag_index<W>(wtr: &mut W, scheme: TagScheme, header: bool) -> Result<()>
where
    W: Write,
{
    let entries: Vec<_> = scheme
        .tags()
        .iter()
        .zip(0..)
        .map(|(tag, i)| (tag.as_str(), i))
        .collect();
    write_index_table(wtr, entries, header)
}

/// Reads a table written by [`write_index_table()`], with or without the header.
///
/// # Errors
///
/// If a line is malformed or the header disagrees with the number of entries, an error variant
/// will be returned.
pub fn read_index_table<R>(rdr: R) -> Result<Vec<(String, u32)>>
where
    R: BufRead,
{
    let mut entries = vec![];
    let mut expected_size = None;
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        match line.rsplit_once('\t') {
            Some((key, index)) => entries.push((key.to_string(), index.parse()?)),
            None if i == 0 => expected_size = Some(line.parse::<usize>()?),
            None => {
                return Err(CwsError::invalid_argument(
                    "rdr",
                    format!("line {}: missing tab", i + 1),
                ));
            }
        }
    }
    if let Some(size) = expected_size {
        if size != entries.len() {
            return Err(CwsError::invalid_argument(
                "rdr",
                format!("header says {size} entries but {} found", entries.len()),
            ));
        }
    }
    Ok(entries)
}

/// Writes `<char> <label>` lines of a line followed by a blank line.
pub fn write_char_tags<W>(wtr: &mut W, line: &AnnotatedLine) -> Result<()>
where
    W: Write,
{
    for (c, tag) in line.chars.iter().zip(&line.tags) {
        writeln!(wtr, "{c} {tag}")?;
    }
    writeln!(wtr)?;
    Ok(())
}

/// Writes space-separated feature strings and the label of each character, followed by a blank
/// line.
pub fn write_feature_lines<W>(wtr: &mut W, line: &AnnotatedLine) -> Result<()>
where
    W: Write,
{
    for (features, tag) in line.features.iter().zip(&line.tags) {
        for feature in features {
            write!(wtr, "{feature} ")?;
        }
        writeln!(wtr, "{tag}")?;
    }
    writeln!(wtr)?;
    Ok(())
}

/// Converts a segmented corpus into the char/tag table and the feature file.
///
/// Lines are read and annotated `chunk_size` at a time, so memory use does not grow with the
/// corpus. Each chunk is annotated in parallel and written in input order.
///
/// # Returns
///
/// The number of non-blank lines written.
///
/// # Errors
///
/// If `chunk_size` is zero, or a reader or a writer generates an error, an error variant will be
/// returned.
pub fn write_corpus_features<R, W1, W2>(
    rdr: R,
    encoder: &Encoder,
    chunk_size: usize,
    char_tag_wtr: &mut W1,
    feature_wtr: &mut W2,
) -> Result<usize>
where
    R: BufRead,
    W1: Write,
    W2: Write,
{
    if chunk_size == 0 {
        return Err(CwsError::invalid_argument(
            "chunk_size",
            "must be at least 1",
        ));
    }
    let mut n_lines = 0;
    let mut chunk = Vec::with_capacity(chunk_size);
    let mut lines = rdr.lines();
    loop {
        let line = lines.next().transpose()?;
        let at_end = line.is_none();
        if let Some(line) = line.as_deref().and_then(TokenizedLine::parse) {
            chunk.push(line);
        }
        if chunk.len() == chunk_size || (at_end && !chunk.is_empty()) {
            for annotated in encoder.annotate_all(&chunk) {
                write_char_tags(char_tag_wtr, &annotated)?;
                write_feature_lines(feature_wtr, &annotated)?;
            }
            n_lines += chunk.len();
            chunk.clear();
            tracing::debug!(n_lines, "chunk written");
        }
        if at_end {
            break;
        }
    }
    Ok(n_lines)
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes a group of the encoded index file and of the label file.
pub fn write_encoded<W1, W2>(
    feature_wtr: &mut W1,
    tag_wtr: &mut W2,
    example: &EncodedExample,
) -> Result<()>
where
    W1: Write,
    W2: Write,
{
    for ids in &example.features {
        writeln!(feature_wtr, "{}", join_ids(ids))?;
    }
    writeln!(feature_wtr)?;
    write!(tag_wtr, "{}\n\n", join_ids(&example.tags))?;
    Ok(())
}

/// Converts a feature file written by [`write_feature_lines()`] into the encoded index file and
/// the label file.
///
/// Features missing in `vocabulary` are dropped. When `header` is set, both outputs start with
/// the size of the respective index table.
///
/// # Returns
///
/// The number of groups written.
///
/// # Errors
///
/// If a label is not part of `scheme`, an error variant will be returned.
pub fn index_feature_file<R, W1, W2>(
    rdr: R,
    vocabulary: &FeatureVocabulary,
    scheme: TagScheme,
    feature_wtr: &mut W1,
    tag_wtr: &mut W2,
    header: bool,
) -> Result<usize>
where
    R: BufRead,
    W1: Write,
    W2: Write,
{
    if header {
        write_header(feature_wtr, vocabulary.len())?;
        write_header(tag_wtr, scheme.tags().len())?;
    }
    let mut n_groups = 0;
    let mut example = EncodedExample::default();
    for line in rdr.lines() {
        let line = line?;
        let line = trim_line(&line);
        if line.is_empty() {
            if !example.is_empty() {
                write_encoded(feature_wtr, tag_wtr, &example)?;
                example = EncodedExample::default();
                n_groups += 1;
            }
            continue;
        }
        let mut fields: Vec<_> = line.split(' ').collect();
        let tag = fields.pop().unwrap_or_default();
        let tag_id = tag
            .parse::<Tag>()
            .ok()
            .and_then(|tag| scheme.tag_index(tag))
            .ok_or_else(|| CwsError::invalid_argument("rdr", format!("unknown label: {tag}")))?;
        example
            .features
            .push(fields.into_iter().filter_map(|f| vocabulary.get(f)).collect());
        example.tags.push(tag_id);
    }
    if !example.is_empty() {
        write_encoded(feature_wtr, tag_wtr, &example)?;
        n_groups += 1;
    }
    tracing::debug!(n_groups, "feature file indexed");
    Ok(n_groups)
}
