//! Compact single-line encoding for discovery queries.
//!
//! # Design
//! A query object writes its fields in declared order joined by its own
//! divider character. Child objects are encoded first and then written as
//! one field of the parent. Inside a field, the divider and the escape
//! character are prefixed with `\`, so free text such as "R&B ~ Soul" can
//! never shift later fields. Nesting composes: a child's escapes are
//! escaped again by its parent and undone in reverse on the way back.
//!
//! Decoding is lenient about length: fields missing at the end take their
//! default value. It is strict about content: a boolean other than
//! `true`/`false` or an unknown enum wire value is an error.

use thiserror::Error;

use crate::enums::WireEnum;

const ESCAPE: char = '\\';

/// Field separator for each query object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Divider {
    Certifications,
    Dates,
    Query,
    Votes,
    With,
    Without,
}

impl Divider {
    pub fn as_char(self) -> char {
        match self {
            Divider::Certifications => '~',
            Divider::Dates => '!',
            Divider::Query => '@',
            Divider::Votes => '#',
            Divider::With => '$',
            Divider::Without => '%',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("field {index}: expected true or false, got {value:?}")]
    InvalidBool { index: usize, value: String },

    #[error("field {index}: {value:?} is not a {kind}")]
    UnknownVariant {
        index: usize,
        kind: &'static str,
        value: String,
    },

    #[error("input ends with an unfinished escape")]
    DanglingEscape,
}

/// A value with a compact encoding.
pub trait Compact: Sized + Default {
    const DIVIDER: Divider;

    fn write_fields(&self, out: &mut Writer);

    fn read_fields(input: &mut Reader) -> Result<Self, CodecError>;

    fn to_compact(&self) -> String {
        let mut writer = Writer::new(Self::DIVIDER);
        self.write_fields(&mut writer);
        writer.finish()
    }

    fn from_compact(text: &str) -> Result<Self, CodecError> {
        let mut reader = Reader::new(text, Self::DIVIDER)?;
        Self::read_fields(&mut reader)
    }
}

pub struct Writer {
    divider: char,
    fields: Vec<String>,
}

impl Writer {
    pub fn new(divider: Divider) -> Self {
        Self {
            divider: divider.as_char(),
            fields: Vec::new(),
        }
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        let mut field = String::with_capacity(value.len());
        for ch in value.chars() {
            if ch == self.divider || ch == ESCAPE {
                field.push(ESCAPE);
            }
            field.push(ch);
        }
        self.fields.push(field);
        self
    }

    pub fn bool(&mut self, value: bool) -> &mut Self {
        self.string(if value { "true" } else { "false" })
    }

    pub fn wire<E: WireEnum>(&mut self, value: E) -> &mut Self {
        self.string(value.as_wire())
    }

    pub fn child<C: Compact>(&mut self, value: &C) -> &mut Self {
        self.string(&value.to_compact())
    }

    pub fn finish(self) -> String {
        self.fields.join(&self.divider.to_string())
    }
}

pub struct Reader {
    fields: std::vec::IntoIter<String>,
    index: usize,
}

impl Reader {
    pub fn new(text: &str, divider: Divider) -> Result<Self, CodecError> {
        let fields = split_fields(text, divider.as_char())?;
        Ok(Self {
            fields: fields.into_iter(),
            index: 0,
        })
    }

    fn next_field(&mut self) -> Option<String> {
        self.index += 1;
        self.fields.next()
    }

    pub fn string(&mut self) -> String {
        self.next_field().unwrap_or_default()
    }

    pub fn bool(&mut self) -> Result<bool, CodecError> {
        match self.next_field().as_deref() {
            None => Ok(false),
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(CodecError::InvalidBool {
                index: self.index - 1,
                value: other.to_string(),
            }),
        }
    }

    pub fn wire<E: WireEnum + Default>(&mut self) -> Result<E, CodecError> {
        match self.next_field() {
            None => Ok(E::default()),
            Some(value) => E::from_wire(&value).ok_or(CodecError::UnknownVariant {
                index: self.index - 1,
                kind: E::KIND,
                value,
            }),
        }
    }

    pub fn child<C: Compact>(&mut self) -> Result<C, CodecError> {
        match self.next_field() {
            None => Ok(C::default()),
            Some(text) => C::from_compact(&text),
        }
    }
}

/// Splits on unescaped dividers and removes one level of escaping.
fn split_fields(text: &str, divider: char) -> Result<Vec<String>, CodecError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE {
            current.push(chars.next().ok_or(CodecError::DanglingEscape)?);
        } else if ch == divider {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);
    Ok(fields)
}
