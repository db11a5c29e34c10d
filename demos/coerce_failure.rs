use cliopts::{parse_opts, Cause, CliError, CoerceType, ParseConfig};

fn main() {
    let config = ParseConfig::new().coerce("b", CoerceType::Long);

    let x = match parse_opts(&["-b", "dude"], &config) {
        Ok(opts) => panic!("expected a coerce failure, got {opts:?}"),
        Err(error) => error,
    };
    let y = CliError {
        spec: None,
        cause: Cause::Coerce,
        msg: "Coerce failure: cannot transform input \"dude\" to long".to_string(),
        option: Some("b".to_string()),
        value: Some("dude".to_string()),
    };

    println!("{} {x:?}", x.error_type());
    assert_eq!(x, y);
}
