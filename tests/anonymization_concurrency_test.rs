//! Concurrent use of a shared record anonymizer

use pii::anonymizable;
use pii::anonymization::{DelimitedAnonymizer, RecordAnonymizer};
use pii::domain::CallContext;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, PartialEq)]
struct Patient {
    name: String,
    ward: String,
}

anonymizable!(Patient { name: marked });

#[test]
fn test_shared_anonymizer_across_threads() {
    let anonymizer = Arc::new(RecordAnonymizer::<str, Patient>::new(
        DelimitedAnonymizer::new(),
    ));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let anonymizer = Arc::clone(&anonymizer);
            thread::spawn(move || {
                let ctx = CallContext::background();
                let key = format!("tenant-{worker}");

                for i in 0..100 {
                    let patient = Patient {
                        name: format!("patient-{worker}-{i}"),
                        ward: "B".to_string(),
                    };

                    let stored = anonymizer.anonymize(&ctx, key.as_str(), &patient).unwrap();
                    assert_eq!(stored.name, format!("anonymized.{key}.{}", patient.name));

                    let restored = anonymizer.deanonymize(&ctx, key.as_str(), stored).unwrap();
                    assert_eq!(restored, patient);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_cloned_anonymizers_are_independent_of_records() {
    let anonymizer = RecordAnonymizer::<str, Patient>::new(DelimitedAnonymizer::new());
    let clone = anonymizer.clone();
    let ctx = CallContext::background();

    let patient = Patient {
        name: "Ada".to_string(),
        ward: "C".to_string(),
    };

    thread::scope(|scope| {
        let a = scope.spawn(|| anonymizer.anonymize(&ctx, "one", &patient).unwrap());
        let b = scope.spawn(|| clone.anonymize(&ctx, "two", &patient).unwrap());

        assert_eq!(a.join().unwrap().name, "anonymized.one.Ada");
        assert_eq!(b.join().unwrap().name, "anonymized.two.Ada");
    });
}
