use argtable::{Arg, ArgTable};

const NO_NEWLINE: usize = 0;
const HELP: usize = 1;
const WORDS: usize = 2;

fn main() {
    let mut table = ArgTable::new([
        Arg::lit0("n", "", "do not output the trailing newline"),
        Arg::lit0("h", "help", "display this help and exit"),
        Arg::strn("", "", "<string>", 0, 100, "the strings to echo"),
        Arg::end(20),
    ])
    .expect("the table must be valid");

    let errors = table.parse_env().expect("the table must be complete");

    if table.get(HELP).map(Arg::count).unwrap_or(0) > 0 {
        table.print_syntax("echo");
        table.print_glossary();
        return;
    }

    if errors > 0 {
        table.print_errors("echo");
        eprintln!("Try 'echo --help' for more information.");
        std::process::exit(1);
    }

    let words: Vec<&str> = table
        .get(WORDS)
        .and_then(Arg::as_text)
        .map(|text| text.values().iter().map(String::as_str).collect())
        .unwrap_or_default();
    print!("{}", words.join(" "));

    if table.get(NO_NEWLINE).map(Arg::count).unwrap_or(0) == 0 {
        println!();
    }
}
