/**/

//! Mailbox name validity. Mailbox names are absolute `/`-separated
//! paths; `fileinto` also tries the `/`-prefixed form of a relative
//! name, so relative names are accepted by that route.

/// Returns true if `name` is a well-formed absolute mailbox name:
/// a leading slash, nonempty components, and no control characters or
/// IMAP wildcards anywhere.
pub fn valid_name(name: &str) -> bool
{
	let rest = match name.strip_prefix('/')
	{
		Some(rest) => rest,
		None => return false,
	};
	if rest.is_empty()
	{
		return false;
	}
	if rest.split('/').any(|component| component.is_empty())
	{
		return false;
	}
	rest.chars().all(|c| !c.is_control() && c != '*' && c != '%')
}
