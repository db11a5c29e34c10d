use cliopts::{Coerce, CoerceType, DispatchTable, Dispatched, ParseConfig};

fn copy(dispatched: Dispatched) -> i32 {
    println!("copy {:?} (recursive: {:?})", dispatched.args, dispatched.opts.get("recursive"));
    0
}

fn tag(dispatched: Dispatched) -> i32 {
    println!("tag {:?}", dispatched.opts.get("labels"));
    0
}

fn main() {
    let table = DispatchTable::new()
        .command(
            ["copy"],
            ParseConfig::new()
                .coerce("recursive", CoerceType::Boolean)
                .alias("r", "recursive"),
            copy,
        )
        .command(
            ["tag", "add"],
            ParseConfig::new().coerce("labels", Coerce::Collection(CoerceType::Keyword)),
            tag,
        );

    let input: Vec<String> = std::env::args().skip(1).collect();
    let tokens: Vec<&str> = input.iter().map(AsRef::as_ref).collect();

    let exit_code = match table.dispatch(&tokens) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}: {error}", error.cause);
            1
        }
    };

    std::process::exit(exit_code);
}
