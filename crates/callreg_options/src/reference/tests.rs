use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn calls<'a>(r: &ArgumentRef<'a>) -> Vec<(&'a str, Vec<&'a str>)> {
    r.options
        .iter()
        .map(|c| (c.name, c.params.to_vec()))
        .collect()
}

#[test]
fn plain_name_has_no_options() {
    let r = ArgumentRef::parse("nums");
    assert_eq!(r.name, "nums");
    assert!(!r.has_options());
    assert_eq!(base_name("nums"), "nums");
}

#[test]
fn single_option_without_params() {
    let r = ArgumentRef::parse("nums:...");
    assert_eq!(r.name, "nums");
    assert_eq!(calls(&r), vec![("...", vec![])]);
}

#[test]
fn option_with_params() {
    let r = ArgumentRef::parse("nums:index=0,2");
    assert_eq!(calls(&r), vec![("index", vec!["0", "2"])]);
}

#[test]
fn chain_preserves_order() {
    let r = ArgumentRef::parse("cfg:index=hosts;...;upper=a=b");
    assert_eq!(r.name, "cfg");
    assert_eq!(
        calls(&r),
        vec![
            ("index", vec!["hosts"]),
            ("...", vec![]),
            // only the first `=` separates the name
            ("upper", vec!["a=b"]),
        ]
    );
}

#[test]
fn name_ends_at_first_delimiter() {
    let r = ArgumentRef::parse("a:b:c");
    assert_eq!(r.name, "a");
    assert_eq!(calls(&r), vec![("b:c", vec![])]);
    assert_eq!(base_name("a:b:c"), "a");
}

#[test]
fn malformed_pieces_are_kept_verbatim() {
    // trailing separator yields an empty option name
    let r = ArgumentRef::parse("a:index=0;");
    assert_eq!(calls(&r), vec![("index", vec!["0"]), ("", vec![])]);

    // empty chain after the delimiter
    let r = ArgumentRef::parse("a:");
    assert_eq!(calls(&r), vec![("", vec![])]);

    // `=` with nothing after it is one empty parameter
    let r = ArgumentRef::parse("a:index=");
    assert_eq!(calls(&r), vec![("index", vec![""])]);
}

#[test]
fn display_reassembles_reference() {
    for s in ["a", "a:...", "a:index=0,1", "a:index=k;...", "a:index=", "a:pick=1,,3;..."] {
        assert_eq!(ArgumentRef::parse(s).to_string(), s);
    }
}

proptest! {
    #[test]
    fn base_name_never_contains_delimiter(s in "[a-z:;=,]{0,24}") {
        let name = base_name(&s);
        prop_assert!(!name.contains(OPTION_DELIMITER));
        prop_assert!(s.starts_with(name));
        prop_assert_eq!(ArgumentRef::parse(&s).name, name);
    }
}
