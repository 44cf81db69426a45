//! Record anonymization engine
//!
//! This module provides the traversal that walks a record, hands every marked
//! string field to a [`StringAnonymizer`], and recurses into nested records,
//! plus the [`RecordAnonymizer`] that binds a key type, a record type and an
//! anonymizer together.
//!
//! # Examples
//!
//! ```
//! use pii::anonymizable;
//! use pii::anonymization::{DelimitedAnonymizer, RecordAnonymizer};
//! use pii::domain::CallContext;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Person {
//!     first_name: String,
//!     last_name: String,
//!     company: String,
//! }
//!
//! anonymizable!(Person {
//!     first_name: marked,
//!     last_name: marked,
//! });
//!
//! # fn main() -> pii::domain::Result<()> {
//! let anonymizer = RecordAnonymizer::<str, Person>::new(DelimitedAnonymizer::new());
//! let ctx = CallContext::background();
//!
//! let person = Person {
//!     first_name: "John".to_string(),
//!     last_name: "Doe".to_string(),
//!     company: "Acme".to_string(),
//! };
//!
//! let anonymized = anonymizer.anonymize(&ctx, "id", &person)?;
//! assert_eq!(anonymized.first_name, "anonymized.id.John");
//! assert_eq!(anonymized.company, "Acme");
//!
//! let restored = anonymizer.deanonymize(&ctx, "id", anonymized)?;
//! assert_eq!(restored, person);
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{
    anonymizer::{build_string_anonymizer, SharedStringAnonymizer, StringAnonymizer},
    config::AnonymizationConfig,
    record::{Anonymizable, FieldVisitor},
};
use crate::domain::{CallContext, Result};
use crate::{log_record_transformed, log_transform_failure};
use std::borrow::Borrow;
use std::fmt;
use std::fmt::Display;
use std::marker::PhantomData;
use std::sync::Arc;

/// Which string anonymizer operation the traversal applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward transform
    Anonymize,
    /// Inverse transform
    Deanonymize,
}

impl Direction {
    /// Label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Anonymize => "anonymize",
            Direction::Deanonymize => "deanonymize",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visitor applying one direction of a string anonymizer
struct TransformVisitor<'a, K: ?Sized, A: ?Sized> {
    anonymizer: &'a A,
    ctx: &'a CallContext,
    key: &'a K,
    direction: Direction,
    path: Vec<&'static str>,
    transformed: usize,
    paths: Option<Vec<String>>,
}

impl<'a, K, A> TransformVisitor<'a, K, A>
where
    K: ?Sized,
    A: StringAnonymizer<K> + ?Sized,
{
    fn field_path(&self, field: &str) -> String {
        let mut path = self.path.join(".");
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(field);
        path
    }
}

impl<'a, K, A> FieldVisitor for TransformVisitor<'a, K, A>
where
    K: ?Sized,
    A: StringAnonymizer<K> + ?Sized,
{
    fn visit_string(&mut self, field: &'static str, value: &mut String) -> Result<()> {
        let result = match self.direction {
            Direction::Anonymize => {
                self.anonymizer
                    .anonymize_string(self.ctx, self.key, value.as_str())
            }
            Direction::Deanonymize => {
                self.anonymizer
                    .deanonymize_string(self.ctx, self.key, value.as_str())
            }
        };

        let transformed = match result {
            Ok(transformed) => transformed,
            Err(e) => {
                log_transform_failure!(self.field_path(field), self.direction, &e);
                return Err(e);
            }
        };

        if self.paths.is_some() {
            let path = self.field_path(field);
            if let Some(paths) = self.paths.as_mut() {
                paths.push(path);
            }
        }

        *value = transformed;
        self.transformed += 1;
        Ok(())
    }

    fn enter_record(&mut self, field: &'static str) {
        self.path.push(field);
    }

    fn exit_record(&mut self, _field: &'static str) {
        self.path.pop();
    }
}

/// Outcome of a successful traversal
#[derive(Debug)]
pub struct Transformed<T> {
    /// The transformed copy
    pub record: T,
    /// Number of marked fields that were rewritten
    pub fields: usize,
    /// Dotted paths of the rewritten fields in visit order, when requested
    pub paths: Option<Vec<String>>,
}

/// Transform a copy of `record`
///
/// The caller's record is cloned and only the clone is modified. Marked string
/// fields are rewritten and nested records visited in declaration order. The
/// first error from the anonymizer aborts the traversal and is returned
/// unchanged; the partially transformed copy is dropped.
pub fn transform<K, T, A>(
    anonymizer: &A,
    ctx: &CallContext,
    key: &K,
    record: &T,
    direction: Direction,
    collect_paths: bool,
) -> Result<Transformed<T>>
where
    K: ?Sized,
    T: Anonymizable + Clone,
    A: StringAnonymizer<K> + ?Sized,
{
    let mut copy = record.clone();

    let mut visitor = TransformVisitor {
        anonymizer,
        ctx,
        key,
        direction,
        path: Vec::new(),
        transformed: 0,
        paths: collect_paths.then(Vec::new),
    };

    copy.visit_fields(&mut visitor)?;

    Ok(Transformed {
        record: copy,
        fields: visitor.transformed,
        paths: visitor.paths,
    })
}

/// Anonymizes and deanonymizes whole records
///
/// `K` is the key type handed to the string anonymizer and `T` the record
/// type. The engine keeps no per-record state and performs no I/O: one
/// instance can be cloned or shared across threads and used for any number of
/// records, provided the bound [`StringAnonymizer`] is itself safe to share
/// (the trait requires `Send + Sync`).
///
/// Records are accepted by value or by a single reference
/// (`impl Borrow<T>`); deeper indirection is rejected at compile time.
pub struct RecordAnonymizer<K: ?Sized, T> {
    string_anonymizer: SharedStringAnonymizer<K>,
    _record: PhantomData<fn(&T) -> T>,
}

impl<K, T> RecordAnonymizer<K, T>
where
    K: ?Sized,
    T: Anonymizable + Clone,
{
    /// Create a record anonymizer bound to `string_anonymizer`
    pub fn new<A>(string_anonymizer: A) -> Self
    where
        A: StringAnonymizer<K> + 'static,
    {
        Self::from_shared(Arc::new(string_anonymizer))
    }

    /// Create a record anonymizer from an already shared string anonymizer
    pub fn from_shared(string_anonymizer: SharedStringAnonymizer<K>) -> Self {
        Self {
            string_anonymizer,
            _record: PhantomData,
        }
    }

    /// Build a record anonymizer from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn from_config(config: &AnonymizationConfig) -> anyhow::Result<Self>
    where
        K: Display + 'static,
    {
        config.validate()?;
        Ok(Self::from_shared(build_string_anonymizer::<K>(config)?))
    }

    /// Anonymize every marked field of `record` under `key`
    ///
    /// # Errors
    ///
    /// Returns the first error produced by the string anonymizer. No
    /// partially anonymized record is ever returned.
    pub fn anonymize(&self, ctx: &CallContext, key: &K, record: impl Borrow<T>) -> Result<T> {
        self.run(ctx, key, record.borrow(), Direction::Anonymize, false)
            .map(|transformed| transformed.record)
    }

    /// Reverse [`anonymize`](Self::anonymize) for every marked field
    ///
    /// # Errors
    ///
    /// Same as [`anonymize`](Self::anonymize).
    pub fn deanonymize(&self, ctx: &CallContext, key: &K, record: impl Borrow<T>) -> Result<T> {
        self.run(ctx, key, record.borrow(), Direction::Deanonymize, false)
            .map(|transformed| transformed.record)
    }

    /// Like [`anonymize`](Self::anonymize)/[`deanonymize`](Self::deanonymize),
    /// also reporting which fields were rewritten
    ///
    /// [`Transformed::paths`] is always `Some`. Callers that keep an audit
    /// trail record these paths themselves; the engine never persists them.
    pub fn apply(
        &self,
        ctx: &CallContext,
        key: &K,
        record: impl Borrow<T>,
        direction: Direction,
    ) -> Result<Transformed<T>> {
        self.run(ctx, key, record.borrow(), direction, true)
    }

    fn run(
        &self,
        ctx: &CallContext,
        key: &K,
        record: &T,
        direction: Direction,
        collect_paths: bool,
    ) -> Result<Transformed<T>> {
        let transformed = transform(
            self.string_anonymizer.as_ref(),
            ctx,
            key,
            record,
            direction,
            collect_paths,
        )?;

        log_record_transformed!(std::any::type_name::<T>(), direction, transformed.fields);

        Ok(transformed)
    }
}

impl<K: ?Sized, T> Clone for RecordAnonymizer<K, T> {
    fn clone(&self) -> Self {
        Self {
            string_anonymizer: Arc::clone(&self.string_anonymizer),
            _record: PhantomData,
        }
    }
}

impl<K: ?Sized, T> fmt::Debug for RecordAnonymizer<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordAnonymizer")
            .field("record_type", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::anonymizer::{DelimitedAnonymizer, MaskingAnonymizer};
    use crate::domain::PiiError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Contact {
        email: String,
        phone: String,
        verified: bool,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Person {
        first_name: String,
        last_name: String,
        company: String,
        contact: Contact,
    }

    crate::anonymizable!(Contact { email: marked });
    crate::anonymizable!(Person {
        first_name: marked,
        last_name: marked,
        contact: nested,
    });

    fn person() -> Person {
        Person {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            company: "Acme".to_string(),
            contact: Contact {
                email: "john@acme.test".to_string(),
                phone: "555-0100".to_string(),
                verified: true,
            },
        }
    }

    /// Fails on the n-th call and counts invocations
    struct FailingAnonymizer {
        fail_at: usize,
        calls: AtomicUsize,
    }

    impl StringAnonymizer<str> for FailingAnonymizer {
        fn anonymize_string(&self, _ctx: &CallContext, _key: &str, value: &str) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call == self.fail_at {
                return Err(PiiError::transform("backend unavailable"));
            }
            Ok(value.to_uppercase())
        }

        fn deanonymize_string(
            &self,
            _ctx: &CallContext,
            _key: &str,
            value: &str,
        ) -> Result<String> {
            Ok(value.to_lowercase())
        }
    }

    #[test]
    fn test_transform_counts_fields() {
        let anonymizer = DelimitedAnonymizer::new();
        let ctx = CallContext::background();

        let result = transform(
            &anonymizer,
            &ctx,
            "id",
            &person(),
            Direction::Anonymize,
            false,
        )
        .unwrap();

        assert_eq!(result.fields, 3);
        assert!(result.paths.is_none());
        assert_eq!(result.record.contact.email, "anonymized.id.john@acme.test");
    }

    #[test]
    fn test_transform_collects_nested_paths() {
        let anonymizer = MaskingAnonymizer::default();
        let ctx = CallContext::background();

        let result = transform(
            &anonymizer,
            &ctx,
            "***",
            &person(),
            Direction::Anonymize,
            true,
        )
        .unwrap();

        let paths = result.paths.unwrap();
        assert_eq!(paths, vec!["first_name", "last_name", "contact.email"]);
    }

    #[test]
    fn test_original_is_untouched() {
        let anonymizer = RecordAnonymizer::<str, Person>::new(MaskingAnonymizer::default());
        let ctx = CallContext::background();
        let original = person();

        let masked = anonymizer.anonymize(&ctx, "***", &original).unwrap();

        assert_eq!(original, person());
        assert_eq!(masked.first_name, "***");
        assert_eq!(masked.contact.phone, "555-0100");
        assert!(masked.contact.verified);
    }

    #[test]
    fn test_fail_fast_stops_traversal() {
        let failing = Arc::new(FailingAnonymizer {
            fail_at: 2,
            calls: AtomicUsize::new(0),
        });
        let anonymizer = RecordAnonymizer::<str, Person>::from_shared(failing.clone());
        let ctx = CallContext::background();

        let result = anonymizer.anonymize(&ctx, "id", person());

        assert_eq!(
            result,
            Err(PiiError::Transform("backend unavailable".to_string()))
        );
        assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_direction_label() {
        assert_eq!(Direction::Anonymize.to_string(), "anonymize");
        assert_eq!(Direction::Deanonymize.to_string(), "deanonymize");
    }

    #[test]
    fn test_debug_hides_anonymizer() {
        let anonymizer = RecordAnonymizer::<str, Person>::new(MaskingAnonymizer::default());
        let debug = format!("{anonymizer:?}");
        assert!(debug.contains("RecordAnonymizer"));
        assert!(debug.contains("Person"));
    }

    #[test]
    fn test_apply_reports_paths_in_both_directions() {
        let anonymizer = RecordAnonymizer::<str, Person>::new(DelimitedAnonymizer::new());
        let ctx = CallContext::background();

        let forward = anonymizer
            .apply(&ctx, "id", person(), Direction::Anonymize)
            .unwrap();
        let backward = anonymizer
            .apply(&ctx, "id", &forward.record, Direction::Deanonymize)
            .unwrap();

        assert_eq!(forward.fields, 3);
        assert_eq!(forward.paths, backward.paths);
        assert_eq!(
            forward.paths.unwrap(),
            vec!["first_name", "last_name", "contact.email"]
        );
        assert_eq!(backward.record, person());
    }

    #[test]
    fn test_from_config_rejects_undecodable_layout() {
        let config = AnonymizationConfig {
            strategy: crate::anonymization::AnonymizationStrategy::Delimited,
            separator: String::new(),
            ..AnonymizationConfig::default()
        };

        assert!(RecordAnonymizer::<str, Person>::from_config(&config).is_err());
    }
}
