use argtable::{Arg, ArgKind, ArgTable};

const ALL: usize = 0;
const LONG: usize = 1;
const HUMAN: usize = 2;
const WIDTH: usize = 3;
const COLOR: usize = 4;
const HELP: usize = 5;
const FILES: usize = 6;

fn main() {
    let mut table = ArgTable::new([
        Arg::lit0("a", "all", "do not ignore entries starting with ."),
        Arg::lit0("l", "", "use a long listing format"),
        Arg::lit0("h", "human-readable", "print sizes in human readable format"),
        Arg::int0("w", "width", "<cols>", "assume screen width instead of current width"),
        Arg::str0("", "color", "<when>", "colorize the output (never, always, auto)")
            .map(Arg::optional_value),
        Arg::lit0("", "help", "display this help and exit"),
        Arg::filen("", "", "", 0, 100, "the files to list"),
        Arg::rem("", "with no <file>, list the current directory"),
        Arg::end(20),
    ])
    .expect("the table must be valid");

    if table.null_check() {
        eprintln!("ls: insufficient memory");
        std::process::exit(1);
    }

    // Defaults, which remain when an option is given without a value.
    if let Some(ArgKind::Integer(width)) = table.get_mut(WIDTH).map(Arg::kind_mut) {
        width.preset(80);
    }

    if let Some(ArgKind::Text(color)) = table.get_mut(COLOR).map(Arg::kind_mut) {
        color.preset("always");
    }

    let errors = table.parse_env().expect("the table must be complete");

    if count(&table, HELP) > 0 {
        table.print_syntax("ls");
        println!("List information about the FILEs (the current directory by default).");
        table.print_glossary();
        return;
    }

    if errors > 0 {
        table.print_errors("ls");
        eprintln!("Try 'ls --help' for more information.");
        std::process::exit(1);
    }

    let width = table
        .get(WIDTH)
        .and_then(Arg::as_integer)
        .and_then(|width| width.values().first().copied())
        .unwrap_or(80);
    let color = table
        .get(COLOR)
        .and_then(Arg::as_text)
        .and_then(|color| color.values().first().cloned())
        .unwrap_or_else(|| "never".to_string());

    println!("all: {}", count(&table, ALL) > 0);
    println!("long: {}", count(&table, LONG) > 0);
    println!("human-readable: {}", count(&table, HUMAN) > 0);
    println!("width: {width}");
    println!("color: {color}");

    if let Some(files) = table.get(FILES).and_then(Arg::as_file_path) {
        for parts in files.values() {
            println!(
                "file: {} (basename: '{}', extension: '{}')",
                parts.filename, parts.basename, parts.extension
            );
        }
    }
}

fn count(table: &ArgTable, index: usize) -> usize {
    table.get(index).map(Arg::count).unwrap_or(0)
}
