use cliopts::{CoerceType, CommandLine, ParseConfig, Spec};

fn main() {
    let spec = Spec::new()
        .option("name", |o| {
            o.alias("n")
                .reference("<who>")
                .desc("Who to greet.")
                .default("world")
        })
        .option("times", |o| {
            o.alias("t")
                .coerce(CoerceType::Long)
                .desc("How many greetings.")
                .default(1i64)
        })
        .option("shout", |o| {
            o.alias("s")
                .coerce(CoerceType::Boolean)
                .desc("Greet loudly.")
        });
    let parsed = CommandLine::new("greeter", ParseConfig::new().spec(spec))
        .about("Greets people.")
        .parse();

    let name: String = parsed.get("name").unwrap_or_default();
    let times: i64 = parsed.get("times").unwrap_or(1);
    let shout: bool = parsed.get("shout").unwrap_or(false);

    for _ in 0..times {
        let greeting = format!("Hello, {name}!");

        if shout {
            println!("{}", greeting.to_uppercase());
        } else {
            println!("{greeting}");
        }
    }
}
