//! End-to-end behaviour of the checker in both build modes.

use invariant::error::{MINIFIED_MESSAGE, MISSING_TEMPLATE_MESSAGE};
use invariant::{BuildMode, Checker, ErrorKind, InvariantConfig, InvariantError};

fn dev() -> Checker {
    Checker::new(BuildMode::Development).with_logging(false)
}

fn opt() -> Checker {
    Checker::new(BuildMode::Optimized).with_logging(false)
}

#[test]
fn true_condition_never_fails_with_a_template() {
    for checker in [dev(), opt()] {
        for template in ["", "plain", "%s", "a %s b %s c"] {
            assert!(
                checker.check(true, Some(template), &[&"x"]).is_ok(),
                "{:?} rejected {template:?}",
                checker.mode()
            );
        }
    }
}

#[test]
fn validate_then_check_ordering_in_development() {
    let err = dev().check(true, None, &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTemplate);
    assert_eq!(err.message(), MISSING_TEMPLATE_MESSAGE);
}

#[test]
fn optimized_skips_validation() {
    assert!(opt().check(true, None, &[]).is_ok());

    let err = opt().check(false, None, &[&1, &2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Minified);
    assert_eq!(err.message(), MINIFIED_MESSAGE);
    assert_eq!(err.skip_frames(), Some(1));
    assert_eq!(err.name(), None);
}

#[test]
fn documented_examples() {
    let cases: [(&str, &[&dyn std::fmt::Display], &str); 3] = [
        ("Expected %s but got %s", &[&"a", &"b"], "Expected a but got b"),
        ("Missing %s", &[], "Missing undefined"),
        ("fixed message", &[&"ignored"], "fixed message"),
    ];
    for (template, args, want) in cases {
        let err = dev().check(false, Some(template), args).unwrap_err();
        assert_eq!(err.message(), want);
        assert_eq!(err.name(), Some("Invariant Violation"));
        assert_eq!(err.skip_frames(), Some(1));
    }
}

#[test]
fn optimized_never_reveals_the_template() {
    for template in ["Expected %s but got %s", "Missing %s", "fixed message"] {
        let err = opt()
            .check(false, Some(template), &[&"token-1234"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Minified);
        assert_eq!(err.message(), MINIFIED_MESSAGE);
        assert_eq!(err.name(), None);
        assert_eq!(err.skip_frames(), Some(1));
    }
}

#[test]
fn owned_and_borrowed_arguments_mix() {
    let id = String::from("ws-7");
    let count = 3_usize;
    let err = dev()
        .check(false, Some("%s has %s pending (%s)"), &[&id, &count, &'!'])
        .unwrap_err();
    assert_eq!(err.message(), "ws-7 has 3 pending (!)");
}

#[test]
fn identical_calls_give_identical_errors() {
    let run = |checker: Checker| -> Vec<InvariantError> {
        (0..2)
            .map(|_| checker.check(false, Some("n=%s"), &[&5]).unwrap_err())
            .collect()
    };
    let first = run(dev());
    assert_eq!(first[0], first[1]);
    assert_eq!(first[0].message(), "n=5");
}

#[test]
fn errors_propagate_with_question_mark() {
    fn pop(stack: &mut Vec<u32>) -> anyhow::Result<u32> {
        dev().check(
            !stack.is_empty(),
            Some("pop from empty stack of capacity %s"),
            &[&stack.capacity()],
        )?;
        Ok(stack.pop().unwrap_or_default())
    }

    let mut stack = Vec::with_capacity(4);
    stack.push(9);
    assert_eq!(pop(&mut stack).unwrap(), 9);

    let err = pop(&mut stack).unwrap_err();
    let inner = err.downcast_ref::<InvariantError>().unwrap();
    assert_eq!(inner.kind(), ErrorKind::Violation);
    assert!(inner.message().starts_with("pop from empty stack of capacity "));
}

#[test]
fn serialized_shape_for_reporters() {
    let err = dev().check(false, Some("bad %s"), &[&"input"]).unwrap_err();
    let json = serde_json::to_string(&err).unwrap();
    assert_eq!(
        json,
        r#"{"message":"bad input","name":"Invariant Violation","skipFrames":1}"#
    );
}

#[test]
fn config_built_checker_follows_file() {
    let cfg = InvariantConfig::parse("[checker]\nmode = \"optimized\"\nlog_violations = false\n")
        .unwrap();
    let checker = cfg.checker();
    assert!(checker.check(true, None, &[]).is_ok());
    let err = checker.check(false, Some("slot %s"), &[&2]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Minified);
}

#[test]
fn enforce_reports_call_site() {
    let result = std::panic::catch_unwind(|| {
        dev().enforce(false, Some("unreachable state %s"), &[&42]);
    });
    let payload = result.unwrap_err();
    let msg = payload
        .downcast_ref::<String>()
        .cloned()
        .unwrap_or_default();
    assert!(msg.contains("Invariant Violation: unreachable state 42"), "got: {msg}");
    assert!(msg.contains(file!()), "got: {msg}");
}
