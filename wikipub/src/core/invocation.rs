//! Argument vector for the external publishing tool.

use std::ffi::OsString;

/// Flags passed to `md2cf` on every run, ahead of any user argument.
pub const FIXED_FLAGS: [&str; 10] = [
    "--debug",
    "--collapse-single-pages",
    "--enable-relative-links",
    "--insecure",
    "--minor-edit",
    "--only-changed",
    "--preface-markdown",
    "--top-level",
    "--skip-empty",
    "--use-pages-file",
];

/// Everything needed to build one tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    pub executable: String,
    pub fixed_flags: Vec<String>,
    pub user_args: Vec<OsString>,
}

impl InvocationSpec {
    pub fn new(executable: impl Into<String>, user_args: Vec<OsString>) -> Self {
        Self {
            executable: executable.into(),
            fixed_flags: FIXED_FLAGS.iter().map(|flag| flag.to_string()).collect(),
            user_args,
        }
    }

    /// Arguments after the program name: fixed flags, then user arguments
    /// unchanged and in order.
    pub fn argv(&self) -> Vec<OsString> {
        self.fixed_flags
            .iter()
            .map(OsString::from)
            .chain(self.user_args.iter().cloned())
            .collect()
    }

    /// Lossy single-line rendering for logs.
    pub fn display(&self) -> String {
        let mut line = self.executable.clone();
        for arg in self.argv() {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn os(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn fixed_flags_come_first_then_user_args_in_order() {
        let spec = InvocationSpec::new("md2cf", os(&["docs/", "--title", "My Page"]));
        let argv = spec.argv();
        assert_eq!(argv.len(), FIXED_FLAGS.len() + 3);
        assert_eq!(&argv[..FIXED_FLAGS.len()], os(&FIXED_FLAGS).as_slice());
        assert_eq!(&argv[FIXED_FLAGS.len()..], os(&["docs/", "--title", "My Page"]).as_slice());
    }

    #[test]
    fn fixed_flag_set_is_exact() {
        let flags: BTreeSet<&str> = FIXED_FLAGS.iter().copied().collect();
        assert_eq!(flags.len(), 10);
        for flag in [
            "--debug",
            "--collapse-single-pages",
            "--enable-relative-links",
            "--insecure",
            "--minor-edit",
            "--only-changed",
            "--preface-markdown",
            "--top-level",
            "--skip-empty",
            "--use-pages-file",
        ] {
            assert!(flags.contains(flag), "missing {flag}");
        }
    }

    #[test]
    fn user_args_are_not_deduplicated_or_interpreted() {
        let spec = InvocationSpec::new("md2cf", os(&["--debug", "--", "--help", "--debug"]));
        let argv = spec.argv();
        assert_eq!(
            &argv[FIXED_FLAGS.len()..],
            os(&["--debug", "--", "--help", "--debug"]).as_slice()
        );
    }

    #[test]
    fn no_user_args_yields_only_fixed_flags() {
        let spec = InvocationSpec::new("md2cf", Vec::new());
        assert_eq!(spec.argv(), os(&FIXED_FLAGS));
    }

    #[test]
    fn display_joins_program_and_arguments() {
        let spec = InvocationSpec::new("md2cf", os(&["README.md"]));
        let line = spec.display();
        assert!(line.starts_with("md2cf --debug --collapse-single-pages"));
        assert!(line.ends_with("--use-pages-file README.md"));
    }
}
