//! Output archive building a JSON value tree.

use serde_json::{Map, Value};

use super::convert::scalar_to_json;
use super::TextOptions;
use crate::archive::{Archive, Direction};
use crate::describe::Describe;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::{FieldKey, KeyPath};
use crate::primitive::Primitive;
use crate::variant::{self, Tag, Variant, TAG_KEY};

enum Frame {
    Object(Map<String, Value>),
    Array(Vec<Value>),
}

/// Encodes a value into a [`serde_json::Value`].
///
/// Aggregates become objects keyed by field name, sequences become arrays,
/// variants become `{"tag": .., "value": ..}` objects.
pub struct TextWriter {
    options: TextOptions,
    root: Option<Value>,
    frames: Vec<Frame>,
    path: KeyPath,
}

impl Default for TextWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextWriter {
    pub fn new() -> Self {
        Self::with_options(TextOptions::default())
    }

    pub fn with_options(options: TextOptions) -> Self {
        Self {
            options,
            root: None,
            frames: Vec::new(),
            path: KeyPath::new(),
        }
    }

    /// Writes `value` as the root and returns the finished tree.
    pub fn encode<T: Field>(mut self, value: &mut T) -> Result<Value, ArchiveError> {
        T::visit(&mut self, FieldKey::ELEMENT, value)?;
        Ok(self.finish())
    }

    /// Consumes the writer, returning whatever was written at the root.
    pub fn finish(self) -> Value {
        self.root.unwrap_or(Value::Null)
    }

    fn place(&mut self, key: FieldKey, value: Value) -> Result<(), ArchiveError> {
        match self.frames.last_mut() {
            Some(Frame::Object(map)) => match key.name() {
                Some(name) => {
                    map.insert(name.to_owned(), value);
                    Ok(())
                }
                None => Err(self.path.error(ErrorKind::Unrepresentable(
                    "unkeyed value inside an aggregate".to_owned(),
                ))),
            },
            Some(Frame::Array(items)) => {
                items.push(value);
                Ok(())
            }
            None => {
                self.root = Some(value);
                Ok(())
            }
        }
    }

    fn close(&mut self) -> Value {
        match self.frames.pop() {
            Some(Frame::Object(map)) => Value::Object(map),
            Some(Frame::Array(items)) => Value::Array(items),
            None => Value::Null,
        }
    }
}

impl Archive for TextWriter {
    fn direction(&self) -> Direction {
        Direction::Output
    }

    fn primitive<P: Primitive>(
        &mut self,
        key: FieldKey,
        value: &mut P,
    ) -> Result<(), ArchiveError> {
        let json = scalar_to_json(value.into_scalar()).ok_or_else(|| {
            self.path.error_at(
                key,
                ErrorKind::Unrepresentable(format!(
                    "non-finite {} has no JSON form",
                    P::KIND.name()
                )),
            )
        })?;
        self.place(key, json)
    }

    fn string(&mut self, key: FieldKey, value: &mut String) -> Result<(), ArchiveError> {
        self.place(key, Value::String(value.clone()))
    }

    fn optional<T: Field>(
        &mut self,
        key: FieldKey,
        value: &mut Option<T>,
    ) -> Result<(), ArchiveError> {
        match value {
            Some(inner) => T::visit(self, key, inner),
            None => match self.frames.last() {
                Some(Frame::Object(_)) if !self.options.null_for_absent => Ok(()),
                _ => self.place(key, Value::Null),
            },
        }
    }

    fn sequence<T, F>(
        &mut self,
        key: FieldKey,
        value: &mut Vec<T>,
        mut visit: F,
    ) -> Result<(), ArchiveError>
    where
        T: Default,
        F: FnMut(&mut Self, &mut T) -> Result<(), ArchiveError>,
    {
        let entered = self.path.enter(key);
        self.frames.push(Frame::Array(Vec::with_capacity(value.len())));
        for (i, elem) in value.iter_mut().enumerate() {
            self.path.enter_index(i);
            visit(self, elem)?;
            self.path.leave_index();
        }
        let items = self.close();
        self.path.leave(entered);
        self.place(key, items)
    }

    fn variant<V: Variant>(&mut self, key: FieldKey, value: &mut V) -> Result<(), ArchiveError> {
        let mut tag: Tag =
            variant::checked_tag(value).map_err(|kind| self.path.error_at(key, kind))?;
        let entered = self.path.enter(key);
        self.frames.push(Frame::Object(Map::new()));
        self.primitive(FieldKey::named(TAG_KEY), &mut tag)?;
        value.describe_payload(self)?;
        let object = self.close();
        self.path.leave(entered);
        self.place(key, object)
    }

    fn nested<T: Describe>(&mut self, key: FieldKey, value: &mut T) -> Result<(), ArchiveError> {
        let entered = self.path.enter(key);
        self.frames.push(Frame::Object(Map::new()));
        value.describe(self)?;
        let object = self.close();
        self.path.leave(entered);
        self.place(key, object)
    }
}
