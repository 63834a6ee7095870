use std::cell::RefCell;
use std::rc::Rc;

use argtable::prelude::*;
use argtable::{Arg, ArgFlags, ArgTable, Descriptor, ErrorCode};

const OUT_OF_RANGE: u32 = 1;

// A percentage in 0..=100, written to a shared vector so the values outlive the parse.
struct Percent {
    values: Rc<RefCell<Vec<u8>>>,
}

impl Capture for Percent {
    fn reset(&mut self) {
        self.values.borrow_mut().clear();
    }

    fn scan(&mut self, descriptor: &Descriptor, token: Option<&str>) -> Result<(), ErrorCode> {
        let mut values = self.values.borrow_mut();

        if values.len() >= descriptor.max_count() {
            return Err(ErrorCode::MaxCount);
        }

        let token = token.unwrap_or("100").trim_end_matches('%');
        let value: u8 = token.parse().map_err(|_| ErrorCode::InvalidValue)?;

        if value > 100 {
            return Err(ErrorCode::Custom(OUT_OF_RANGE));
        }

        values.push(value);
        Ok(())
    }

    fn check(&self, descriptor: &Descriptor) -> Result<(), ErrorCode> {
        if self.values.borrow().len() < descriptor.min_count() {
            Err(ErrorCode::MinCount)
        } else {
            Ok(())
        }
    }

    fn render_error(
        &self,
        descriptor: &Descriptor,
        code: ErrorCode,
        token: Option<&str>,
        program: &str,
    ) -> String {
        let token = token.unwrap_or_default();

        match code {
            ErrorCode::MinCount => format!("{program}: missing option {}", descriptor.syntax()),
            ErrorCode::MaxCount => format!("{program}: excess option {}", descriptor.syntax()),
            ErrorCode::Custom(OUT_OF_RANGE) => format!(
                "{program}: {token} is not within 0-100 at option {}",
                descriptor.syntax()
            ),
            _ => format!(
                "{program}: invalid argument \"{token}\" to option {}",
                descriptor.syntax()
            ),
        }
    }

    fn count(&self) -> usize {
        self.values.borrow().len()
    }
}

fn main() {
    let shares = Rc::new(RefCell::new(Vec::default()));
    let descriptor = Descriptor::new("p", "percent")
        .datatype("<0-100>")
        .glossary("a share, in percent (defaults to 100)")
        .counts(1, 4)
        .flags(ArgFlags::HAS_VALUE | ArgFlags::HAS_OPTIONAL_VALUE);

    let mut table = ArgTable::new([
        Arg::custom(
            descriptor,
            Percent {
                values: shares.clone(),
            },
        ),
        Arg::end(20),
    ])
    .expect("the table must be valid");

    let errors = table.parse_env().expect("the table must be complete");

    if errors > 0 {
        table.print_errors("custom");
        table.print_syntax("custom");
        table.print_glossary();
        std::process::exit(1);
    }

    let total: u32 = shares.borrow().iter().map(|share| u32::from(*share)).sum();
    println!("Shares: {:?} (total {total}%)", shares.borrow());
}
