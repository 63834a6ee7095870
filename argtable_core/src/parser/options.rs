use crate::api::{AllocError, Arg};
use crate::scanner::{HasArg, LongOption};

/// The option tables handed to the [`OptionScanner`](crate::scanner::OptionScanner), derived from the table entries.
#[derive(Debug)]
pub(crate) struct OptionTable {
    short_spec: String,
    long_options: Vec<LongOption>,
}

impl OptionTable {
    pub(crate) fn build(entries: &[&mut Arg]) -> Result<Self, AllocError> {
        // Each short option takes at most its own character plus "::".
        let spec_bound = entries
            .iter()
            .flat_map(|arg| arg.descriptor().short_opts())
            .try_fold(1usize, |total, c| total.checked_add(c.len_utf8() + 2))
            .ok_or(AllocError {
                requested: usize::MAX,
            })?;
        let long_bound = entries
            .iter()
            .map(|arg| arg.descriptor().long_opts().len())
            .try_fold(0usize, usize::checked_add)
            .ok_or(AllocError {
                requested: usize::MAX,
            })?;

        let mut short_spec = String::new();
        short_spec
            .try_reserve_exact(spec_bound)
            .map_err(|_| AllocError {
                requested: spec_bound,
            })?;
        let mut long_options = Vec::new();
        long_options
            .try_reserve_exact(long_bound)
            .map_err(|_| AllocError {
                requested: long_bound,
            })?;

        // Report a missing value rather than treating the option as unknown.
        short_spec.push(':');

        for (index, arg) in entries.iter().enumerate() {
            let descriptor = arg.descriptor();
            let has_arg = HasArg::from(descriptor.arg_flags());

            for option in descriptor.short_opts() {
                short_spec.push(*option);

                match has_arg {
                    HasArg::No => {}
                    HasArg::Required => short_spec.push(':'),
                    HasArg::Optional => short_spec.push_str("::"),
                }
            }

            long_options.extend(descriptor.long_opts().iter().map(|name| LongOption {
                name: name.clone(),
                has_arg,
                index,
            }));
        }

        Ok(Self {
            short_spec,
            long_options,
        })
    }

    pub(crate) fn short_spec(&self) -> &str {
        &self.short_spec
    }

    pub(crate) fn long_options(&self) -> &[LongOption] {
        &self.long_options
    }
}
