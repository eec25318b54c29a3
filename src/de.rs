//! Loading table literals.
//!
//! [`Parser`] evaluates the text written by [`crate::ser::Serializer`]. It is
//! a restricted evaluator for a small data grammar, not a general
//! interpreter: there are no calls, operators (besides unary minus on number
//! literals) or control flow, so loading a file never runs code.
//!
//! ```text
//! chunk   := { stat [';'] } [ 'return' exp [';'] ]
//! stat    := ['local'] Name '=' exp
//! exp     := 'nil' | 'true' | 'false' | ['-'] Number | String | table | Name
//! table   := '{' [ field { sep field } [sep] ] '}'
//! field   := '[' exp ']' '=' exp | Name '=' exp | exp
//! sep     := ',' | ';'
//! ```
//!
//! A chunk evaluates to its `return` expression, or to the last assigned
//! value when there is no `return`. A table constructor with only positional
//! fields becomes a [`Value::Sequence`]; anything else (including `{}`)
//! becomes a [`Value::Mapping`] whose positional fields are keyed from 1.
//!
//! The second half of the module deserializes a loaded [`Value`] into any
//! `T: Deserialize` (see [`crate::from_value`]).
//!
//! ## Usage
//!
//! ```rust
//! use tabletext::{from_str_value, Value};
//!
//! let value = from_str_value("config = {\n    [ \"debug\" ] = true,\n}\nreturn config\n").unwrap();
//! assert_eq!(value.get("debug"), Some(&Value::Bool(true)));
//! ```

use crate::{Error, Key, Number, Result, Table, Value};
use serde::de::value::{I64Deserializer, StringDeserializer};
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::collections::HashMap;

/// Deepest table nesting the parser accepts. The serializer refuses to
/// write anything deeper.
pub const MAX_DEPTH: usize = 256;

/// The table-literal evaluator.
///
/// Created via [`Parser::new`]; [`Parser::parse`] consumes the whole input.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
    names: HashMap<String, Value>,
}

type Checkpoint = (usize, usize, usize);

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
            names: HashMap::new(),
        }
    }

    /// Evaluates the whole input and returns the chunk's value.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] with the line and column of the first problem.
    pub fn parse(mut self) -> Result<Value> {
        let mut last_assigned: Option<String> = None;
        loop {
            self.skip_trivia();
            if self.at_end() {
                break;
            }
            if self.consume_keyword("return") {
                let value = self.parse_exp()?;
                self.skip_trivia();
                self.eat(';');
                self.skip_trivia();
                if !self.at_end() {
                    return Err(self.error("expected end of input after 'return'"));
                }
                return Ok(value);
            }

            self.consume_keyword("local");
            self.skip_trivia();
            let name = self.parse_name()?;
            self.skip_trivia();
            self.expect('=')?;
            let value = self.parse_exp()?;
            self.skip_trivia();
            self.eat(';');

            self.names.insert(name.clone(), value);
            last_assigned = Some(name);
        }

        last_assigned
            .and_then(|name| self.names.remove(&name))
            .ok_or_else(|| self.error("input does not produce a value"))
    }

    fn error(&self, msg: &str) -> Error {
        Error::parse(self.line, self.column, msg)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.position..].chars().nth(1)
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn checkpoint(&self) -> Checkpoint {
        (self.position, self.line, self.column)
    }

    fn restore(&mut self, (position, line, column): Checkpoint) {
        self.position = position;
        self.line = line;
        self.column = column;
    }

    /// Skips whitespace and `--` line comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek_char() {
                Some(ch) if ch.is_whitespace() => {
                    self.next_char();
                }
                Some('-') if self.peek_second() == Some('-') => {
                    while let Some(ch) = self.next_char() {
                        if ch == '\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.next_char();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.next_char();
                Ok(())
            }
            Some(ch) => Err(self.error(&format!("expected '{}', found '{}'", expected, ch))),
            None => Err(self.error(&format!("expected '{}', found end of input", expected))),
        }
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        let rest = &self.input[self.position..];
        let matched = rest.starts_with(keyword)
            && rest[keyword.len()..]
                .chars()
                .next()
                .map_or(true, |ch| !is_name_char(ch));
        if matched {
            for _ in 0..keyword.chars().count() {
                self.next_char();
            }
            true
        } else {
            false
        }
    }

    fn parse_name(&mut self) -> Result<String> {
        match self.peek_char() {
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {}
            Some(ch) => return Err(self.error(&format!("expected a name, found '{}'", ch))),
            None => return Err(self.error("expected a name, found end of input")),
        }
        let start = self.position;
        while matches!(self.peek_char(), Some(ch) if is_name_char(ch)) {
            self.next_char();
        }
        Ok(self.input[start..self.position].to_string())
    }

    fn parse_exp(&mut self) -> Result<Value> {
        self.skip_trivia();
        match self.peek_char() {
            Some('{') => self.parse_table(),
            Some(quote @ ('"' | '\'')) => self.parse_string(quote).map(Value::String),
            Some('-') => {
                self.next_char();
                self.skip_trivia();
                match self.peek_char() {
                    Some(ch) if ch.is_ascii_digit() || ch == '.' => {
                        self.parse_number(true).map(Value::Number)
                    }
                    _ => Err(self.error("'-' is only supported before a number")),
                }
            }
            Some(ch) if ch.is_ascii_digit() || ch == '.' => {
                self.parse_number(false).map(Value::Number)
            }
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
                let (line, column) = (self.line, self.column);
                let name = self.parse_name()?;
                match name.as_str() {
                    "nil" => Ok(Value::Nil),
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    other => self.names.get(other).cloned().ok_or_else(|| {
                        Error::parse(line, column, &format!("unknown name '{}'", other))
                    }),
                }
            }
            Some(ch) => Err(self.error(&format!("unexpected '{}'", ch))),
            None => Err(self.error("expected a value, found end of input")),
        }
    }

    fn parse_number(&mut self, negative: bool) -> Result<Number> {
        let input = self.input;
        let (line, column) = (self.line, self.column);
        let malformed = |text: &str| Error::parse(line, column, &format!("malformed number '{}'", text));

        if self.peek_char() == Some('0') && matches!(self.peek_second(), Some('x' | 'X')) {
            self.next_char();
            self.next_char();
            let start = self.position;
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_hexdigit()) {
                self.next_char();
            }
            let digits = &input[start..self.position];
            if matches!(self.peek_char(), Some(ch) if is_name_char(ch) || ch == '.') {
                return Err(malformed(digits));
            }
            // Hex literals wrap around like two's complement.
            let raw = u64::from_str_radix(digits, 16).map_err(|_| malformed(digits))? as i64;
            return Ok(Number::Integer(if negative { raw.wrapping_neg() } else { raw }));
        }

        let start = self.position;
        let mut is_float = false;
        while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
            self.next_char();
        }
        if self.eat('.') {
            is_float = true;
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            is_float = true;
            self.next_char();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.next_char();
            }
            while matches!(self.peek_char(), Some(ch) if ch.is_ascii_digit()) {
                self.next_char();
            }
        }
        let digits = &input[start..self.position];
        if matches!(self.peek_char(), Some(ch) if is_name_char(ch) || ch == '.') {
            return Err(malformed(digits));
        }

        let text = if negative {
            format!("-{}", digits)
        } else {
            digits.to_string()
        };
        if !is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Number::Integer(i));
            }
        }
        // Integers that overflow i64 become floats.
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| malformed(&text))
    }

    fn parse_string(&mut self, quote: char) -> Result<String> {
        self.next_char(); // opening quote
        let mut bytes: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4];

        loop {
            let ch = match self.next_char() {
                Some(ch) => ch,
                None => return Err(self.error("unterminated string")),
            };
            match ch {
                c if c == quote => break,
                '\n' => return Err(self.error("unfinished string: raw newline")),
                '\\' => self.parse_escape(&mut bytes)?,
                other => bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes()),
            }
        }

        String::from_utf8(bytes).map_err(|_| self.error("string is not valid UTF-8"))
    }

    fn parse_escape(&mut self, bytes: &mut Vec<u8>) -> Result<()> {
        let escaped = match self.next_char() {
            Some(ch) => ch,
            None => return Err(self.error("unterminated string")),
        };
        match escaped {
            'n' | '\n' => bytes.push(b'\n'),
            'r' => bytes.push(b'\r'),
            't' => bytes.push(b'\t'),
            'a' => bytes.push(0x07),
            'b' => bytes.push(0x08),
            'f' => bytes.push(0x0C),
            'v' => bytes.push(0x0B),
            '\\' => bytes.push(b'\\'),
            '"' => bytes.push(b'"'),
            '\'' => bytes.push(b'\''),
            'z' => {
                while matches!(self.peek_char(), Some(ch) if ch.is_whitespace()) {
                    self.next_char();
                }
            }
            'x' => {
                let mut code = 0u8;
                for _ in 0..2 {
                    let digit = self
                        .next_char()
                        .and_then(|ch| ch.to_digit(16))
                        .ok_or_else(|| self.error("hexadecimal digit expected in '\\x' escape"))?;
                    code = code * 16 + digit as u8;
                }
                bytes.push(code);
            }
            'u' => {
                self.expect('{')?;
                let start = self.position;
                while matches!(self.peek_char(), Some(ch) if ch.is_ascii_hexdigit()) {
                    self.next_char();
                }
                let code = u32::from_str_radix(&self.input[start..self.position], 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| self.error("invalid '\\u{...}' escape"))?;
                self.expect('}')?;
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(code.encode_utf8(&mut buf).as_bytes());
            }
            d if d.is_ascii_digit() => {
                let mut code = d.to_digit(10).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek_char().and_then(|ch| ch.to_digit(10)) {
                        Some(digit) => {
                            self.next_char();
                            code = code * 10 + digit;
                        }
                        None => break,
                    }
                }
                let byte = u8::try_from(code).map_err(|_| self.error("decimal escape too large"))?;
                bytes.push(byte);
            }
            other => {
                return Err(self.error(&format!("invalid escape sequence '\\{}'", other)));
            }
        }
        Ok(())
    }

    fn parse_table(&mut self) -> Result<Value> {
        self.expect('{')?;
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("tables nested too deeply"));
        }

        let mut table = Table::new();
        let mut next_index: i64 = 1;
        let mut keyed = false;

        loop {
            self.skip_trivia();
            if self.eat('}') {
                break;
            }

            if self.eat('[') {
                let (line, column) = (self.line, self.column);
                let key = self.parse_exp()?;
                let key = to_key(key).map_err(|msg| Error::parse(line, column, &msg))?;
                self.skip_trivia();
                self.expect(']')?;
                self.skip_trivia();
                self.expect('=')?;
                let value = self.parse_exp()?;
                table.insert(key, value);
                keyed = true;
            } else if let Some(name) = self.try_field_name()? {
                let value = self.parse_exp()?;
                table.insert(name, value);
                keyed = true;
            } else {
                let value = self.parse_exp()?;
                table.insert(next_index, value);
                next_index += 1;
            }

            self.skip_trivia();
            match self.peek_char() {
                Some(',' | ';') => {
                    self.next_char();
                }
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(ch) => return Err(self.error(&format!("expected ',' or '}}', found '{}'", ch))),
                None => return Err(self.error("unclosed table: expected '}'")),
            }
        }

        self.depth -= 1;
        if keyed || table.is_empty() {
            Ok(Value::Mapping(table))
        } else {
            Ok(Value::Sequence(table.into_iter().map(|(_, v)| v).collect()))
        }
    }

    /// Consumes `Name =` when the next field is a named field; otherwise
    /// leaves the input untouched.
    fn try_field_name(&mut self) -> Result<Option<String>> {
        if !matches!(self.peek_char(), Some(ch) if ch.is_ascii_alphabetic() || ch == '_') {
            return Ok(None);
        }
        let checkpoint = self.checkpoint();
        let name = self.parse_name()?;
        self.skip_trivia();
        if self.peek_char() == Some('=') && self.peek_second() != Some('=') {
            self.next_char();
            Ok(Some(name))
        } else {
            self.restore(checkpoint);
            Ok(None)
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn to_key(value: Value) -> std::result::Result<Key, String> {
    match value {
        Value::String(s) => Ok(Key::String(s)),
        Value::Number(Number::Integer(i)) => Ok(Key::Integer(i)),
        Value::Number(n @ Number::Float(_)) => n
            .as_i64()
            .map(Key::Integer)
            .ok_or_else(|| format!("unsupported non-integral key {}", n)),
        Value::Nil => Err("table index is nil".to_string()),
        other => Err(format!("unsupported key of type {}", other.type_name())),
    }
}

pub(crate) struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    pub(crate) fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(table) => visitor.visit_map(MapDeserializer::new(table)),
            Value::Unsupported(what) => Err(Error::custom(format!(
                "cannot deserialize unsupported value ({})",
                what
            ))),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Nil => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    /// Sequences written in the table layout come back as mappings keyed
    /// `1..n`; accept those too.
    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Sequence(items) => visitor.visit_seq(SeqDeserializer::new(items)),
            Value::Mapping(table) => match table.to_sequence() {
                Some(items) => visitor.visit_seq(SeqDeserializer::new(items)),
                None => Err(Error::custom("Expected sequence, found mapping")),
            },
            other => Err(Error::custom(format!(
                "Expected sequence, found {}",
                other.type_name()
            ))),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Mapping(table) if table.len() == 1 => {
                match table.into_iter().next() {
                    Some((Key::String(variant), value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    _ => Err(Error::custom("Expected enum variant name")),
                }
            }
            _ => Err(Error::custom("Expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(items: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: items.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Key, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(table: Table) -> Self {
        MapDeserializer {
            iter: table.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                match key {
                    Key::String(s) => {
                        let de: StringDeserializer<Error> = s.into_deserializer();
                        seed.deserialize(de).map(Some)
                    }
                    Key::Integer(i) => {
                        let de: I64Deserializer<Error> = i.into_deserializer();
                        seed.deserialize(de).map(Some)
                    }
                }
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let de: StringDeserializer<Error> = self.variant.into_deserializer();
        let variant = seed.deserialize(de)?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Nil => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(ValueDeserializer::new(self.value), visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Mapping(table) => visitor.visit_map(MapDeserializer::new(table)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
