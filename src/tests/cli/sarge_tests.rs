use crate::cli::InputArg;
use sarge::ArgumentType;

#[test]
fn input_arg_parses_tokens() {
    let parsed = <InputArg as ArgumentType>::from_value(Some("-"))
        .expect("some")
        .expect("ok");
    assert!(parsed.is_stdin());

    let parsed = <InputArg as ArgumentType>::from_value(Some("@cmds.txt"))
        .expect("some")
        .expect("ok");
    assert_eq!(parsed, InputArg::File("cmds.txt".into()));
}

#[test]
fn input_arg_defaults_to_stdin() {
    let parsed = <InputArg as ArgumentType>::from_value(None)
        .expect("some")
        .expect("ok");
    assert!(parsed.is_stdin());
    assert_eq!(<InputArg as ArgumentType>::default_value(), Some(InputArg::Stdin));
}
