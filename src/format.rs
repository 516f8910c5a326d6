//! `%s` placeholder substitution.
//!
//! The only supported placeholder is the two-character token `%s`. Each
//! occurrence, scanning left to right without overlap, is replaced by the
//! [`Display`] rendering of the next unused argument. Placeholders beyond the
//! last argument render as [`ABSENT`]; surplus arguments are ignored. Every
//! other `%` sequence is copied verbatim and there is no escape syntax.

use std::fmt::{self, Display};

/// The placeholder token.
pub const PLACEHOLDER: &str = "%s";

/// Rendering used for a placeholder that has no matching argument.
pub const ABSENT: &str = "undefined";

/// Substitute `args` into `template`.
///
/// ```
/// use invariant::format::format_template;
///
/// assert_eq!(
///     format_template("Expected %s but got %s", &[&"a", &"b"]),
///     "Expected a but got b"
/// );
/// assert_eq!(format_template("Missing %s", &[]), "Missing undefined");
/// ```
///
/// # Panics
/// If an argument's `Display` impl returns an error, as `format!` does.
#[must_use]
pub fn format_template(template: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    if write_template(&mut out, template, args).is_err() {
        panic!("a Display implementation returned an error unexpectedly");
    }
    out
}

/// Streaming form of [`format_template`].
///
/// # Errors
/// Propagates errors from `out` or from an argument's `Display` impl.
pub fn write_template<W: fmt::Write>(
    out: &mut W,
    template: &str,
    args: &[&dyn Display],
) -> fmt::Result {
    let mut next = args.iter();
    let mut rest = template;
    while let Some(at) = rest.find(PLACEHOLDER) {
        out.write_str(&rest[..at])?;
        match next.next() {
            Some(arg) => write!(out, "{arg}")?,
            None => out.write_str(ABSENT)?,
        }
        rest = &rest[at + PLACEHOLDER.len()..];
    }
    out.write_str(rest)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_in_order() {
        assert_eq!(
            format_template("Expected %s but got %s", &[&"a", &"b"]),
            "Expected a but got b"
        );
    }

    #[test]
    fn missing_argument_renders_absent() {
        assert_eq!(format_template("Missing %s", &[]), "Missing undefined");
        assert_eq!(format_template("%s and %s", &[&1]), "1 and undefined");
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(format_template("fixed message", &[&"ignored"]), "fixed message");
        assert_eq!(format_template("%s!", &[&"a", &"b", &"c"]), "a!");
    }

    #[test]
    fn other_percent_sequences_stay_verbatim() {
        assert_eq!(format_template("%d %i %% %", &[&"x"]), "%d %i %% %");
        assert_eq!(format_template("100%", &[]), "100%");
    }

    #[test]
    fn no_escape_syntax() {
        // `%%s` is a literal `%` followed by a placeholder.
        assert_eq!(format_template("%%s", &[&"x"]), "%x");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        assert_eq!(format_template("%s %s", &[&"%s", &"b"]), "%s b");
    }

    #[test]
    fn adjacent_placeholders() {
        assert_eq!(format_template("%s%s%s", &[&1, &2, &3]), "123");
    }

    #[test]
    fn mixed_argument_types() {
        assert_eq!(
            format_template("%s/%s/%s/%s", &[&42_u8, &-1.5_f64, &'c', &true]),
            "42/-1.5/c/true"
        );
    }

    #[test]
    fn empty_template() {
        assert_eq!(format_template("", &[&"x"]), "");
    }

    #[test]
    fn multibyte_text_around_placeholders() {
        assert_eq!(format_template("é%sü", &[&"ß"]), "éßü");
    }

    struct Failing;

    impl Display for Failing {
        fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    #[should_panic(expected = "Display implementation returned an error")]
    fn failing_argument_is_not_truncated_silently() {
        let _ = format_template("a %s b %s c", &[&Failing, &1]);
    }

    #[test]
    fn write_template_reports_failing_argument() {
        let mut buf = String::new();
        assert_eq!(
            write_template(&mut buf, "a %s b %s c", &[&Failing, &1]),
            Err(fmt::Error)
        );
    }

    #[test]
    fn write_template_streams_into_existing_buffer() {
        let mut buf = String::from("> ");
        write_template(&mut buf, "%s=%s", &[&"k", &"v"]).unwrap();
        assert_eq!(buf, "> k=v");
    }
}
