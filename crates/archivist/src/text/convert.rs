//! Scalar <-> JSON literal conversion.

use serde_json::{Number, Value};

use crate::primitive::{Scalar, ScalarKind};

/// JSON literal for a scalar, or `None` for non-finite floats.
pub(crate) fn scalar_to_json(scalar: Scalar) -> Option<Value> {
    let value = match scalar {
        Scalar::Bool(b) => Value::Bool(b),
        Scalar::U8(n) => Value::from(n),
        Scalar::U16(n) => Value::from(n),
        Scalar::U32(n) => Value::from(n),
        Scalar::U64(n) => Value::from(n),
        Scalar::I8(n) => Value::from(n),
        Scalar::I16(n) => Value::from(n),
        Scalar::I32(n) => Value::from(n),
        Scalar::I64(n) => Value::from(n),
        Scalar::F32(f) => Value::Number(Number::from_f64(f64::from(f))?),
        Scalar::F64(f) => Value::Number(Number::from_f64(f)?),
    };
    Some(value)
}

/// Reads `json` as a scalar of `kind`. Integers must be in range; floats
/// accept any JSON number.
pub(crate) fn scalar_from_json(kind: ScalarKind, json: &Value) -> Option<Scalar> {
    let scalar = match kind {
        ScalarKind::Bool => Scalar::Bool(json.as_bool()?),
        ScalarKind::U8 => Scalar::U8(json.as_u64()?.try_into().ok()?),
        ScalarKind::U16 => Scalar::U16(json.as_u64()?.try_into().ok()?),
        ScalarKind::U32 => Scalar::U32(json.as_u64()?.try_into().ok()?),
        ScalarKind::U64 => Scalar::U64(json.as_u64()?),
        ScalarKind::I8 => Scalar::I8(json.as_i64()?.try_into().ok()?),
        ScalarKind::I16 => Scalar::I16(json.as_i64()?.try_into().ok()?),
        ScalarKind::I32 => Scalar::I32(json.as_i64()?.try_into().ok()?),
        ScalarKind::I64 => Scalar::I64(json.as_i64()?),
        ScalarKind::F32 => {
            let f = json.as_f64()? as f32;
            if !f.is_finite() {
                return None;
            }
            Scalar::F32(f)
        }
        ScalarKind::F64 => Scalar::F64(json.as_f64()?),
    };
    Some(scalar)
}

/// Name of a JSON value's shape, for mismatch reports.
pub(crate) fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(
            scalar_from_json(ScalarKind::U8, &json!(255)),
            Some(Scalar::U8(255))
        );
        assert_eq!(scalar_from_json(ScalarKind::U8, &json!(256)), None);
        assert_eq!(scalar_from_json(ScalarKind::U32, &json!(-1)), None);
        assert_eq!(
            scalar_from_json(ScalarKind::I8, &json!(-128)),
            Some(Scalar::I8(-128))
        );
        assert_eq!(scalar_from_json(ScalarKind::I32, &json!(1.5)), None);
    }

    #[test]
    fn floats_accept_integer_literals() {
        assert_eq!(
            scalar_from_json(ScalarKind::F32, &json!(10)),
            Some(Scalar::F32(10.0))
        );
        assert_eq!(scalar_from_json(ScalarKind::F32, &json!(1e300)), None);
        assert_eq!(scalar_to_json(Scalar::F64(f64::NAN)), None);
        assert_eq!(scalar_to_json(Scalar::F32(10.0)), Some(json!(10.0)));
    }

    #[test]
    fn json_kind_names() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(1)), "integer");
        assert_eq!(json_kind(&json!(1.5)), "float");
        assert_eq!(json_kind(&json!({})), "object");
    }
}
