use triage::{classify_with_defaults, Classifier, RuleSet};

#[test]
fn repeated_classification_is_bit_identical() {
    let classifier = Classifier::with_defaults();
    let subject = "Cannot login to my account";
    let description = "I've been locked out after 3 failed login attempts. Password reset not working.";

    let first = classifier.classify(subject, description);
    let first_wire = serde_json::to_string(&first).expect("serialize");

    for _ in 0..25 {
        let next = classifier.classify(subject, description);
        assert_eq!(next, first);
        // Byte-for-byte on the wire too, including float formatting and
        // keyword ordering.
        assert_eq!(serde_json::to_string(&next).expect("serialize"), first_wire);
    }
}

#[test]
fn separate_engines_with_equal_rules_agree() {
    let a = Classifier::new(RuleSet::default());
    let b = Classifier::with_defaults();

    for (subject, description) in [
        ("", ""),
        ("Feature request: dark mode", "It would be nice to have a dark mode option"),
        ("Refund", "I was overcharged on my last invoice"),
        ("Totally unrelated", "no keywords from any table in here"),
    ] {
        assert_eq!(a.classify(subject, description), b.classify(subject, description));
    }
}

#[test]
fn one_shot_helper_is_deterministic_too() {
    let first = classify_with_defaults("Bug: export broken", "The csv export is broken, cannot reproduce on staging");
    let second = classify_with_defaults("Bug: export broken", "The csv export is broken, cannot reproduce on staging");
    assert_eq!(first, second);
}
