use cliopts::{parse_opts, Coerce, ParseConfig};
use std::str::FromStr;

fn demo(args: &[&str], coerce: &[(&str, &str)]) {
    let mut config = ParseConfig::new();

    for (name, rule) in coerce {
        match Coerce::from_str(rule) {
            Ok(rule) => config = config.coerce(*name, rule),
            Err(error) => {
                eprintln!("{error}");
                return;
            }
        }
    }

    println!("{args:?} {coerce:?} => {:?}", parse_opts(args, &config));
}

fn main() {
    demo(&["--foo", "1"], &[]);
    demo(&["--foo", "1"], &[("foo", "string")]);
    demo(&["--foo", "1"], &[("foo", "[string]")]);
}
