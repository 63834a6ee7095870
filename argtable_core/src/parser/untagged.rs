use crate::model::{ErrorCode, Origin};
use crate::parser::table::Session;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

impl<'t> Session<'t> {
    /// Match the positional `tokens` against the positional entries, in order.
    ///
    /// An entry keeps taking tokens until one fails to scan, at which point the failure is held back and the next entry is tried.
    /// The held back failure is dropped if a later entry accepts the token.
    pub(super) fn parse_untagged(&mut self, tokens: &[&str]) {
        let mut cursor = 0;
        let mut pending: Option<(usize, ErrorCode)> = None;
        let mut index = 0;

        while index < self.entries.len() {
            let token = match tokens.get(cursor) {
                Some(token) => *token,
                None => return,
            };
            let arg = &mut self.entries[index];

            if arg.descriptor().is_tagged() || !arg.can_scan() {
                index += 1;
                continue;
            }

            match arg.scan(Some(token)) {
                Ok(()) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Entry {index} matched '{token}'.");
                    }
                    cursor += 1;
                    pending = None;
                }
                Err(code) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Entry {index} rejected '{token}' ({code}), trying the next entry.");
                    }
                    pending.replace((index, code));
                    index += 1;
                }
            }
        }

        if let Some((origin, code)) = pending {
            self.register(Origin::Entry(origin), code, tokens.get(cursor).copied());
            cursor += 1;
        }

        for token in tokens.iter().skip(cursor) {
            self.register(Origin::Terminator, ErrorCode::UnexpectedArgument, Some(token));
        }
    }
}
