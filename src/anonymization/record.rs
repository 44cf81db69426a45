//! Field marking for anonymizable records
//!
//! A record type declares which of its fields are protected by implementing
//! [`Anonymizable`], normally through the [`anonymizable!`](crate::anonymizable)
//! macro:
//!
//! ```rust
//! use pii::anonymizable;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Address {
//!     pub street: String,
//!     pub country: String,
//! }
//!
//! #[derive(Debug, Clone, PartialEq)]
//! pub struct Customer {
//!     pub first_name: String,
//!     pub company: String,
//!     pub age: u32,
//!     pub address: Address,
//! }
//!
//! anonymizable!(Address { street: marked });
//! anonymizable!(Customer {
//!     first_name: marked,
//!     address: nested,
//! });
//! ```
//!
//! Fields that are not listed are never touched. `marked` only compiles on
//! `String` fields and `nested` only on types that are themselves
//! [`Anonymizable`], so the marking is checked when the type is compiled.
//! Sequences, maps, `Option`, boxed values and enums cannot be declared.
//!
//! Nested records are not discovered automatically: a record-typed field is
//! only descended into when it is listed as `nested`. A nested record that is
//! left out of the list is copied unchanged, even if its own type marks
//! fields.

use crate::domain::Result;

/// A record whose marked string fields can be transformed
pub trait Anonymizable {
    /// Visit marked string fields and nested records in declaration order
    ///
    /// Implementations must stop at the first error and return it unchanged.
    fn visit_fields(&mut self, visitor: &mut dyn FieldVisitor) -> Result<()>;
}

/// Callback interface driven by [`Anonymizable::visit_fields`]
pub trait FieldVisitor {
    /// Called for every marked string field
    fn visit_string(&mut self, field: &'static str, value: &mut String) -> Result<()>;

    /// Called before descending into a nested record
    fn enter_record(&mut self, _field: &'static str) {}

    /// Called after a nested record was visited successfully
    fn exit_record(&mut self, _field: &'static str) {}
}

/// Descend into a nested record field
pub fn visit_nested<R>(
    visitor: &mut dyn FieldVisitor,
    field: &'static str,
    record: &mut R,
) -> Result<()>
where
    R: Anonymizable + ?Sized,
{
    visitor.enter_record(field);
    record.visit_fields(visitor)?;
    visitor.exit_record(field);
    Ok(())
}

/// Implement [`Anonymizable`] for a struct
///
/// Each entry is `field: marked` for a protected `String` field or
/// `field: nested` for a field holding another anonymizable record. List
/// entries in declaration order.
///
/// Every record-typed field that should be transformed must be listed as
/// `nested`. Unlisted fields, including nested records whose own type is
/// [`Anonymizable`], are skipped.
///
/// # Example
///
/// ```rust
/// use pii::anonymizable;
///
/// #[derive(Clone)]
/// struct Patient {
///     name: String,
///     ward: String,
/// }
///
/// anonymizable!(Patient { name: marked });
/// ```
#[macro_export]
macro_rules! anonymizable {
    (@field $self:ident, $visitor:ident, $field:ident, marked) => {
        $crate::anonymization::record::FieldVisitor::visit_string(
            &mut *$visitor,
            stringify!($field),
            &mut $self.$field,
        )?;
    };
    (@field $self:ident, $visitor:ident, $field:ident, nested) => {
        $crate::anonymization::record::visit_nested(
            &mut *$visitor,
            stringify!($field),
            &mut $self.$field,
        )?;
    };
    ($record:ty { $($field:ident : $kind:ident),* $(,)? }) => {
        impl $crate::anonymization::record::Anonymizable for $record {
            #[allow(unused_variables)]
            fn visit_fields(
                &mut self,
                visitor: &mut dyn $crate::anonymization::record::FieldVisitor,
            ) -> $crate::domain::Result<()> {
                $( $crate::anonymizable!(@field self, visitor, $field, $kind); )*
                Ok(())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PiiError;

    #[derive(Debug, Clone, Default)]
    struct Inner {
        secret: String,
        public: String,
    }

    #[derive(Debug, Clone, Default)]
    struct Outer {
        name: String,
        inner: Inner,
        note: String,
    }

    #[derive(Debug, Clone, Default)]
    struct Empty {
        _count: u32,
    }

    crate::anonymizable!(Inner { secret: marked });
    crate::anonymizable!(Outer {
        name: marked,
        inner: nested,
        note: marked,
    });
    crate::anonymizable!(Empty {});

    /// Records the order of callbacks
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        fail_on: Option<&'static str>,
    }

    impl FieldVisitor for Recorder {
        fn visit_string(&mut self, field: &'static str, value: &mut String) -> Result<()> {
            if self.fail_on == Some(field) {
                return Err(PiiError::Transform(field.to_string()));
            }
            self.events.push(format!("{field}={value}"));
            value.push('!');
            Ok(())
        }

        fn enter_record(&mut self, field: &'static str) {
            self.events.push(format!("enter {field}"));
        }

        fn exit_record(&mut self, field: &'static str) {
            self.events.push(format!("exit {field}"));
        }
    }

    fn outer() -> Outer {
        Outer {
            name: "Ada".to_string(),
            inner: Inner {
                secret: "s3cr3t".to_string(),
                public: "visible".to_string(),
            },
            note: "hello".to_string(),
        }
    }

    #[test]
    fn test_visit_order_follows_declaration() {
        let mut record = outer();
        let mut recorder = Recorder::default();

        record.visit_fields(&mut recorder).unwrap();

        assert_eq!(
            recorder.events,
            vec![
                "name=Ada",
                "enter inner",
                "secret=s3cr3t",
                "exit inner",
                "note=hello",
            ]
        );
        assert_eq!(record.name, "Ada!");
        assert_eq!(record.inner.secret, "s3cr3t!");
        assert_eq!(record.inner.public, "visible");
    }

    #[test]
    fn test_visit_stops_at_first_error() {
        let mut record = outer();
        let mut recorder = Recorder {
            fail_on: Some("secret"),
            ..Recorder::default()
        };

        let result = record.visit_fields(&mut recorder);

        assert_eq!(result, Err(PiiError::Transform("secret".to_string())));
        assert_eq!(recorder.events, vec!["name=Ada", "enter inner"]);
        assert_eq!(record.note, "hello");
    }

    #[test]
    fn test_record_without_marked_fields() {
        let mut record = Empty::default();
        let mut recorder = Recorder::default();

        record.visit_fields(&mut recorder).unwrap();
        assert!(recorder.events.is_empty());
    }

    #[derive(Debug, Clone, Default)]
    struct Partial {
        name: String,
        inner: Inner,
    }

    crate::anonymizable!(Partial { name: marked });

    #[test]
    fn test_unlisted_nested_record_is_skipped() {
        let mut record = Partial {
            name: "Ada".to_string(),
            inner: Inner {
                secret: "s3cr3t".to_string(),
                public: "visible".to_string(),
            },
        };
        let mut recorder = Recorder::default();

        record.visit_fields(&mut recorder).unwrap();

        assert_eq!(recorder.events, vec!["name=Ada"]);
        assert_eq!(record.inner.secret, "s3cr3t");
    }
}
