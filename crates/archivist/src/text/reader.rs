//! Input archive reading from a JSON value tree.

use serde_json::{Map, Value};

use super::convert::{json_kind, scalar_from_json};
use super::TextOptions;
use crate::archive::{Archive, Direction};
use crate::describe::Describe;
use crate::error::{ArchiveError, ErrorKind};
use crate::field::Field;
use crate::path::{FieldKey, KeyPath};
use crate::primitive::Primitive;
use crate::variant::{self, Tag, Variant, TAG_KEY};

#[derive(Clone, Copy)]
enum Frame<'a> {
    Object(&'a Map<String, Value>),
    Array { items: &'a [Value], next: usize },
}

/// Decodes a value from a [`serde_json::Value`].
///
/// Object keys are looked up by name, so their order does not matter and
/// unknown keys are ignored. A missing key fails unless the field is
/// optional; `null` also reads as an absent optional.
pub struct TextReader<'a> {
    root: &'a Value,
    options: TextOptions,
    frames: Vec<Frame<'a>>,
    path: KeyPath,
}

impl<'a> TextReader<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self::with_options(root, TextOptions::default())
    }

    pub fn with_options(root: &'a Value, options: TextOptions) -> Self {
        Self {
            root,
            options,
            frames: Vec::new(),
            path: KeyPath::new(),
        }
    }

    /// Reads the root as a `T`.
    pub fn decode<T: Field>(mut self) -> Result<T, ArchiveError> {
        let mut value = T::default();
        T::visit(&mut self, FieldKey::ELEMENT, &mut value)?;
        Ok(value)
    }

    fn peek(&self, key: FieldKey) -> Option<&'a Value> {
        match self.frames.last().copied() {
            Some(Frame::Object(map)) => key.name().and_then(|name| map.get(name)),
            Some(Frame::Array { items, next }) => items.get(next),
            None => Some(self.root),
        }
    }

    fn advance(&mut self) {
        if let Some(Frame::Array { next, .. }) = self.frames.last_mut() {
            *next += 1;
        }
    }

    fn fetch(&mut self, key: FieldKey) -> Result<&'a Value, ArchiveError> {
        let found = self.peek(key);
        self.advance();
        found.ok_or_else(|| match key.name() {
            Some(name) => self.path.error_at(key, ErrorKind::MissingRequiredKey(name)),
            None => self.path.error(ErrorKind::MalformedInput(
                "no value for unkeyed slot".to_owned(),
            )),
        })
    }

    fn mismatch(&self, key: FieldKey, expected: &'static str, found: &Value) -> ArchiveError {
        self.path.error_at(
            key,
            ErrorKind::TypeMismatch {
                expected,
                found: json_kind(found),
            },
        )
    }

    fn fetch_object(&mut self, key: FieldKey) -> Result<&'a Map<String, Value>, ArchiveError> {
        let json = self.fetch(key)?;
        json.as_object()
            .ok_or_else(|| self.mismatch(key, "object", json))
    }
}

impl Archive for TextReader<'_> {
    fn direction(&self) -> Direction {
        Direction::Input
    }

    fn primitive<P: Primitive>(
        &mut self,
        key: FieldKey,
        value: &mut P,
    ) -> Result<(), ArchiveError> {
        let json = self.fetch(key)?;
        *value = scalar_from_json(P::KIND, json)
            .and_then(P::from_scalar)
            .ok_or_else(|| self.mismatch(key, P::KIND.name(), json))?;
        Ok(())
    }

    fn string(&mut self, key: FieldKey, value: &mut String) -> Result<(), ArchiveError> {
        let json = self.fetch(key)?;
        let s = json
            .as_str()
            .ok_or_else(|| self.mismatch(key, "string", json))?;
        value.clear();
        value.push_str(s);
        Ok(())
    }

    fn optional<T: Field>(
        &mut self,
        key: FieldKey,
        value: &mut Option<T>,
    ) -> Result<(), ArchiveError> {
        match self.peek(key) {
            None | Some(Value::Null) => {
                self.advance();
                *value = None;
                Ok(())
            }
            Some(_) => {
                let mut inner = T::default();
                T::visit(self, key, &mut inner)?;
                *value = Some(inner);
                Ok(())
            }
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
        self.path.descend(key, self.options.max_depth)?;
        let json = self.fetch(key)?;
        let items = json
            .as_array()
            .ok_or_else(|| self.mismatch(key, "array", json))?;
        let entered = self.path.enter(key);
        value.clear();
        value.reserve(items.len());
        self.frames.push(Frame::Array {
            items: items.as_slice(),
            next: 0,
        });
        for i in 0..items.len() {
            self.path.enter_index(i);
            let mut elem = T::default();
            visit(self, &mut elem)?;
            value.push(elem);
            self.path.leave_index();
        }
        self.frames.pop();
        self.path.leave(entered);
        self.path.ascend();
        Ok(())
    }

    fn variant<V: Variant>(&mut self, key: FieldKey, value: &mut V) -> Result<(), ArchiveError> {
        self.path.descend(key, self.options.max_depth)?;
        let object = self.fetch_object(key)?;
        let entered = self.path.enter(key);
        self.frames.push(Frame::Object(object));
        let tag_key = FieldKey::named(TAG_KEY);
        let mut tag: Tag = 0;
        self.primitive(tag_key, &mut tag)?;
        let mut decoded: V =
            variant::resolve(tag).map_err(|kind| self.path.error_at(tag_key, kind))?;
        decoded.describe_payload(self)?;
        self.frames.pop();
        self.path.leave(entered);
        self.path.ascend();
        *value = decoded;
        Ok(())
    }

    fn nested<T: Describe>(&mut self, key: FieldKey, value: &mut T) -> Result<(), ArchiveError> {
        self.path.descend(key, self.options.max_depth)?;
        let object = self.fetch_object(key)?;
        let entered = self.path.enter(key);
        self.frames.push(Frame::Object(object));
        value.describe(self)?;
        self.frames.pop();
        self.path.leave(entered);
        self.path.ascend();
        Ok(())
    }
}
