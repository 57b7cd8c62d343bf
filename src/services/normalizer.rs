//! Type-aware value normalization
//!
//! Converts a single raw value into its canonical audit representation,
//! given the field's declared storage type. Dispatch is on the declared
//! type category, never on the runtime shape of the value.

use crate::backend::ValueCodec;
use crate::error::{AuditError, AuditResult};
use crate::models::metadata::StorageType;
use crate::models::value::{NormalizedValue, RawValue};

/// Service converting raw values to comparison-stable audit values
pub struct ValueNormalizer<'a, C: ValueCodec> {
    codec: &'a C,
}

impl<'a, C: ValueCodec> ValueNormalizer<'a, C> {
    /// Create a new value normalizer over the storage layer's codec
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    /// Normalize one value according to its declared storage type
    ///
    /// Null always maps to null. Large integers are pinned to decimal text
    /// because not every serialization boundary preserves 64-bit integer
    /// fidelity; standard integers keep their native form. Decimal, float
    /// and boolean values take the codec's in-memory conversion; every other
    /// declared type takes the codec's storage-level encoding instead.
    /// Codec failures propagate unchanged.
    pub fn normalize(
        &self,
        storage_type: StorageType,
        raw: &RawValue,
    ) -> AuditResult<NormalizedValue> {
        if raw.is_null() {
            return Ok(NormalizedValue::Null);
        }

        if storage_type.is_big_integer() {
            return big_integer_text(storage_type, raw);
        }
        if storage_type.is_native_integer() {
            return native_integer(storage_type, raw);
        }
        if storage_type.converts_to_native() {
            return self.codec.to_native(storage_type, raw);
        }
        self.codec.to_storage(storage_type, raw)
    }
}

fn big_integer_text(storage_type: StorageType, raw: &RawValue) -> AuditResult<NormalizedValue> {
    match raw {
        RawValue::Int(i) => Ok(NormalizedValue::Text(i.to_string())),
        RawValue::Text(s) => {
            let trimmed = s.trim();
            let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(AuditError::conversion(
                    storage_type,
                    format!("'{}' is not a decimal integer", trimmed),
                ));
            }
            Ok(NormalizedValue::Text(trimmed.to_string()))
        }
        other => Err(AuditError::conversion(
            storage_type,
            format!("unexpected {} value", other.kind_name()),
        )),
    }
}

fn native_integer(storage_type: StorageType, raw: &RawValue) -> AuditResult<NormalizedValue> {
    match raw {
        RawValue::Int(i) => Ok(NormalizedValue::Int(*i)),
        RawValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(NormalizedValue::Int)
            .map_err(|e| AuditError::conversion(storage_type, e.to_string())),
        other => Err(AuditError::conversion(
            storage_type,
            format!("unexpected {} value", other.kind_name()),
        )),
    }
}
