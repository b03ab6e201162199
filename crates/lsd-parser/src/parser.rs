//! Line parser for level scheme files.
//!
//! Parsing runs in two passes. [`split_lines`] uses winnow to cut the source
//! into lines, `>`-separated sections and `,`-separated fields while keeping
//! the span of every piece. [`SchemeReader`] then checks each line and
//! registers its levels and transition, emitting a diagnostic for every
//! problem it finds.

use std::{borrow::Cow, ops::Range};

use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::line_ending,
    combinator::{alt, eof, opt, preceded, separated},
    error::{ContextError, ErrMode},
    stream::{LocatingSlice, Location, Stream},
    token::take_while,
};

use lsd_core::scheme::{Level, LevelId, LevelScheme, Transition};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
};

type Input<'src> = LocatingSlice<&'src str>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

const LEVEL_FIELDS: usize = 3;
const TRANSITION_FIELDS: usize = 2;

/// A single comma-separated field with surrounding whitespace trimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Field<'src> {
    text: &'src str,
    span: Span,
}

impl<'src> Field<'src> {
    fn trimmed(raw: &'src str, range: Range<usize>) -> Self {
        let (text, span) = trim_span(raw, range);
        Self { text, span }
    }

    /// Field text with all inner whitespace removed
    fn compact(&self) -> Cow<'src, str> {
        if self.text.contains(char::is_whitespace) {
            Cow::Owned(self.text.chars().filter(|c| !c.is_whitespace()).collect())
        } else {
            Cow::Borrowed(self.text)
        }
    }
}

/// One `>`-separated part of a line.
#[derive(Debug, Clone, PartialEq)]
struct Section<'src> {
    fields: Vec<Field<'src>>,
    span: Span,
}

/// One source line, comment excluded.
#[derive(Debug, Clone, PartialEq)]
struct Line<'src> {
    sections: Vec<Section<'src>>,
    span: Span,
}

impl Line<'_> {
    fn is_blank(&self) -> bool {
        self.span.is_empty()
    }
}

/// Trims whitespace from both ends of `raw`, shrinking `range` to match.
fn trim_span(raw: &str, range: Range<usize>) -> (&str, Span) {
    let leading = raw.len() - raw.trim_start().len();
    let text = raw.trim();
    let start = range.start + leading;
    (text, Span::new(start..start + text.len()))
}

fn field<'src>(input: &mut Input<'src>) -> IResult<Field<'src>> {
    take_while(0.., |c: char| !matches!(c, ',' | '>' | '#' | '\n'))
        .with_span()
        .map(|(raw, range): (&'src str, Range<usize>)| Field::trimmed(raw, range))
        .parse_next(input)
}

fn section<'src>(input: &mut Input<'src>) -> IResult<Section<'src>> {
    separated(1.., field, ',')
        .map(|fields: Vec<Field<'src>>| fields)
        .with_taken()
        .with_span()
        .map(|((fields, raw), range)| Section {
            fields,
            span: trim_span(raw, range).1,
        })
        .parse_next(input)
}

fn comment<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded('#', take_while(0.., |c: char| c != '\n')).parse_next(input)
}

fn line_end(input: &mut Input<'_>) -> IResult<()> {
    alt((line_ending.void(), eof.void())).parse_next(input)
}

fn line<'src>(input: &mut Input<'src>) -> IResult<Line<'src>> {
    let ((sections, raw), range) = separated(1.., section, '>')
        .map(|sections: Vec<Section<'src>>| sections)
        .with_taken()
        .with_span()
        .parse_next(input)?;

    opt(comment).parse_next(input)?;
    line_end(input)?;

    Ok(Line {
        sections,
        span: trim_span(raw, range).1,
    })
}

/// Cuts the source into lines.
///
/// A line that cannot be split is reported as E100 and skipped.
fn split_lines<'src>(source: &'src str, diagnostics: &mut DiagnosticCollector) -> Vec<Line<'src>> {
    let mut input = LocatingSlice::new(source);
    let mut lines = Vec::new();

    while !input.is_empty() {
        let start = input.current_token_start();
        let checkpoint = input.checkpoint();
        match line(&mut input) {
            Ok(line) => lines.push(line),
            Err(_) => {
                input.reset(&checkpoint);
                let rest: IResult<&str> = take_while(0.., |c: char| c != '\n').parse_next(&mut input);
                let end = rest.map_or(start, |rest| start + rest.len());
                diagnostics.emit(
                    Diagnostic::error("unable to read line")
                        .with_code(ErrorCode::E100)
                        .with_label(Span::new(start..end), "unreadable line"),
                );
                if input.current_token_start() == start && !input.is_empty() {
                    input.next_token();
                }
                let _: IResult<Option<&str>> = opt(line_ending).parse_next(&mut input);
            }
        }
    }

    lines
}

/// Collects levels and transitions from split lines.
struct SchemeReader {
    scheme: LevelScheme,
    diagnostics: DiagnosticCollector,
}

impl SchemeReader {
    fn new(diagnostics: DiagnosticCollector) -> Self {
        Self {
            scheme: LevelScheme::new(),
            diagnostics,
        }
    }

    fn read_line(&mut self, line: &Line<'_>) {
        if line.is_blank() {
            trace!(span:? = line.span; "Skipping blank line");
            return;
        }

        let [parent, transition, daughter] = line.sections.as_slice() else {
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "expected 3 sections separated by `>`, found {}",
                    line.sections.len()
                ))
                .with_code(ErrorCode::E100)
                .with_label(line.span, "expected `parent > transition > daughter`")
                .with_help("write one transition per line, e.g. `1332.5,2,1 > 1332.5 > 0,0,1`"),
            );
            return;
        };

        let parent = self.read_level(parent, "parent");
        let transition = self.read_transition(transition);
        let daughter = self.read_level(daughter, "daughter");

        let (Some(parent), Some((gamma, branching_ratio)), Some(daughter)) =
            (parent, transition, daughter)
        else {
            return;
        };

        let (Some(parent), Some(daughter)) = (
            self.add_level(parent, line.span),
            self.add_level(daughter, line.span),
        ) else {
            return;
        };

        let mut transition = Transition::new(parent, daughter);
        if let Some(gamma) = gamma {
            transition = transition.with_gamma(gamma);
        }
        if let Some(branching_ratio) = branching_ratio {
            transition = transition.with_branching_ratio(branching_ratio);
        }
        trace!(
            parent = self.scheme.level(parent).energy(),
            daughter = self.scheme.level(daughter).energy();
            "Read transition"
        );
        self.scheme.add_transition(transition);
    }

    fn read_level(&mut self, section: &Section<'_>, role: &'static str) -> Option<Level> {
        let fields = &section.fields;
        let too_many = fields.len() > LEVEL_FIELDS;
        if too_many {
            let extra = fields[LEVEL_FIELDS..]
                .iter()
                .fold(fields[LEVEL_FIELDS].span, |span, field| span.union(field.span));
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "{role} level has {} fields, at most {LEVEL_FIELDS} are allowed",
                    fields.len()
                ))
                .with_code(ErrorCode::E102)
                .with_label(extra, "unexpected field")
                .with_secondary_label(section.span, format!("in this {role} level"))
                .with_help("a level is written `energy[,spin[,parity]]`"),
            );
        }

        let energy = self.read_energy(&fields[0], role)?;
        if too_many {
            return None;
        }

        let mut level = Level::new(energy);
        if let Some(spin) = self.optional_value(fields.get(1), "spin") {
            level = level.with_spin(spin);
        }
        if let Some(parity) = self.optional_value(fields.get(2), "parity") {
            level = level.with_parity(parity);
        }
        Some(level)
    }

    fn read_energy(&mut self, field: &Field<'_>, role: &'static str) -> Option<f32> {
        let text = field.compact();
        let message = if text.is_empty() || text == "None" {
            format!("{role} level has no energy")
        } else {
            match text.parse::<f32>() {
                Ok(energy) if energy.is_finite() => return Some(energy),
                _ => format!("{role} level energy `{text}` is not a finite number"),
            }
        };

        self.diagnostics.emit(
            Diagnostic::error(message)
                .with_code(ErrorCode::E101)
                .with_label(field.span, "expected a finite number")
                .with_help("write the energy first, e.g. `1332.5,2,1`"),
        );
        None
    }

    fn read_transition(&mut self, section: &Section<'_>) -> Option<(Option<f32>, Option<f32>)> {
        let fields = &section.fields;
        if fields.len() > TRANSITION_FIELDS {
            let extra = fields[TRANSITION_FIELDS..]
                .iter()
                .fold(fields[TRANSITION_FIELDS].span, |span, field| {
                    span.union(field.span)
                });
            self.diagnostics.emit(
                Diagnostic::error(format!(
                    "transition has {} fields, at most {TRANSITION_FIELDS} are allowed",
                    fields.len()
                ))
                .with_code(ErrorCode::E103)
                .with_label(extra, "unexpected field")
                .with_secondary_label(section.span, "in this transition")
                .with_help("a transition is written `[gamma[,branching_ratio]]`"),
            );
            return None;
        }

        Some((
            self.optional_value(fields.first(), "gamma"),
            self.optional_value(fields.get(1), "branching_ratio"),
        ))
    }

    /// Reads an optional numeric field.
    ///
    /// Empty fields and `None` are missing values. Anything else that is not
    /// a finite number is ignored with a warning.
    fn optional_value(&mut self, field: Option<&Field<'_>>, name: &'static str) -> Option<f32> {
        let field = field?;
        let text = field.compact();
        if text.is_empty() || text == "None" {
            return None;
        }

        match text.parse::<f32>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                debug!(field = name, value = &*text, span:? = field.span; "Ignoring unparsable value");
                self.diagnostics.emit(
                    Diagnostic::warning(format!(
                        "{name} `{text}` is not a number and is ignored"
                    ))
                    .with_label(field.span, "ignored")
                    .with_help("write a real number, or `None` to leave the value out"),
                );
                None
            }
        }
    }

    fn add_level(&mut self, level: Level, span: Span) -> Option<LevelId> {
        self.check_redeclaration(&level, span);
        match self.scheme.add_level(level) {
            Ok(id) => Some(id),
            Err(err) => {
                self.diagnostics.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E101)
                        .with_label(span, "in this line"),
                );
                None
            }
        }
    }

    /// Warns when a known level is given again with a different spin or parity.
    fn check_redeclaration(&mut self, level: &Level, span: Span) {
        let Some((_, known)) = self.scheme.find_level(level.key()) else {
            return;
        };
        let conflicts = |given: Option<f32>, kept: Option<f32>| given.is_some() && given != kept;
        if conflicts(level.spin(), known.spin()) || conflicts(level.parity(), known.parity()) {
            self.diagnostics.emit(
                Diagnostic::warning(format!(
                    "level {} is already declared, its first spin and parity are kept",
                    known.name_label()
                ))
                .with_label(span, "conflicting declaration")
                .with_help("declare spin and parity where the level first appears"),
            );
        }
    }

    fn finish(mut self, source: &str) -> Result<LevelScheme, ParseError> {
        if self.scheme.is_empty() && !self.diagnostics.has_errors() {
            self.diagnostics.emit(
                Diagnostic::error("no transitions found")
                    .with_code(ErrorCode::E200)
                    .with_label(Span::new(0..source.len()), "empty scheme")
                    .with_help("add a line such as `100 > 100 > 0`"),
            );
        }

        self.diagnostics.finish()?;
        Ok(self.scheme)
    }
}

/// Parses a whole scheme file.
pub(crate) fn parse_scheme(source: &str) -> Result<LevelScheme, ParseError> {
    let mut diagnostics = DiagnosticCollector::new();
    let lines = split_lines(source, &mut diagnostics);
    debug!(lines = lines.len(); "Split scheme source");

    let mut reader = SchemeReader::new(diagnostics);
    for line in &lines {
        reader.read_line(line);
    }
    reader.finish(source)
}
