/// Behaviour for presenting the output of a table (usage, glossary, errors) to the user.
pub trait UserInterface {
    /// Present a regular message.
    fn print(&self, message: String);

    /// Present an error message.
    fn print_error(&self, message: String);
}

/// Writes messages to stdout, and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }
}

#[cfg(any(test, feature = "unit_test"))]
mod util {
    use super::UserInterface;
    use std::cell::RefCell;

    /// Records messages in memory, so output may be asserted by tests.
    #[derive(Debug, Default)]
    pub struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }
    }

    impl InMemoryInterface {
        /// Take the recorded `(messages, errors)`.
        pub fn consume(self) -> (Vec<String>, Vec<String>) {
            let InMemoryInterface { messages, errors } = self;
            (messages.into_inner(), errors.into_inner())
        }
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub use util::InMemoryInterface;
