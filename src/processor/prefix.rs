//! Wake-prefix resolution.

/// Builds the fully formed command text the host framework wakes on.
///
/// The first configured prefix is prepended unless the command already
/// starts with any configured prefix, so resolution never double-prefixes.
/// Arguments are appended after a single space when present.
///
/// # Examples
///
/// ```
/// use maillart::processor::resolve_full_command;
///
/// let prefixes = vec!["/".to_owned()];
/// assert_eq!(resolve_full_command(&prefixes, "status", ""), "/status");
/// assert_eq!(resolve_full_command(&prefixes, "/status", ""), "/status");
/// assert_eq!(
///     resolve_full_command(&prefixes, "remind add", "text=water"),
///     "/remind add text=water"
/// );
/// ```
#[must_use]
pub fn resolve_full_command(prefixes: &[String], command_name: &str, args: &str) -> String {
    let already_prefixed = prefixes
        .iter()
        .any(|prefix| !prefix.is_empty() && command_name.starts_with(prefix.as_str()));

    let mut full_command = if already_prefixed {
        command_name.to_owned()
    } else {
        let first = prefixes.first().map_or("/", String::as_str);
        format!("{first}{command_name}")
    };

    if !args.is_empty() {
        full_command.push(' ');
        full_command.push_str(args);
    }
    full_command
}
