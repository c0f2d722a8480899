/**/

//! Header field names: RFC 5322 syntax checks, canonical casing and the
//! field-kind registry that tells the `address` test which fields carry
//! addresses.

/// The kind of a known header field. The address-valued kinds come
/// first, so that "is this an address field" is a range check against
/// `LAST_ADDRESS_FIELD`.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldKind
{
	From,
	ResentFrom,
	Sender,
	ResentSender,
	ReturnPath,
	ReplyTo,
	To,
	Cc,
	Bcc,
	ResentTo,
	ResentCc,
	ResentBcc,
	Date,
	ResentDate,
	Subject,
	Comments,
	Keywords,
	MessageId,
	ResentMessageId,
	InReplyTo,
	References,
	MimeVersion,
	ContentType,
	ContentTransferEncoding,
	ContentDisposition,
	ContentDescription,
	Received,
}

pub const LAST_ADDRESS_FIELD: FieldKind = FieldKind::ResentBcc;

impl FieldKind
{
	pub fn is_address(self) -> bool
	{
		self <= LAST_ADDRESS_FIELD
	}
}

/// Looks up the kind of a header field by name, case-insensitively.
/// Returns None for fields this implementation does not know about.
pub fn field_kind(name: &str) -> Option<FieldKind>
{
	match name.to_ascii_lowercase().as_str()
	{
		"from" => Some(FieldKind::From),
		"resent-from" => Some(FieldKind::ResentFrom),
		"sender" => Some(FieldKind::Sender),
		"resent-sender" => Some(FieldKind::ResentSender),
		"return-path" => Some(FieldKind::ReturnPath),
		"reply-to" => Some(FieldKind::ReplyTo),
		"to" => Some(FieldKind::To),
		"cc" => Some(FieldKind::Cc),
		"bcc" => Some(FieldKind::Bcc),
		"resent-to" => Some(FieldKind::ResentTo),
		"resent-cc" => Some(FieldKind::ResentCc),
		"resent-bcc" => Some(FieldKind::ResentBcc),
		"date" => Some(FieldKind::Date),
		"resent-date" => Some(FieldKind::ResentDate),
		"subject" => Some(FieldKind::Subject),
		"comments" => Some(FieldKind::Comments),
		"keywords" => Some(FieldKind::Keywords),
		"message-id" => Some(FieldKind::MessageId),
		"resent-message-id" => Some(FieldKind::ResentMessageId),
		"in-reply-to" => Some(FieldKind::InReplyTo),
		"references" => Some(FieldKind::References),
		"mime-version" => Some(FieldKind::MimeVersion),
		"content-type" => Some(FieldKind::ContentType),
		"content-transfer-encoding" =>
		{
			Some(FieldKind::ContentTransferEncoding)
		}
		"content-disposition" => Some(FieldKind::ContentDisposition),
		"content-description" => Some(FieldKind::ContentDescription),
		"received" => Some(FieldKind::Received),
		_ => None,
	}
}

/// Returns true if `c` may appear in an RFC 5322 field-name: printable
/// US-ASCII except the colon.
pub fn is_field_name_char(c: char) -> bool
{
	let x = c as u32;
	(33..=126).contains(&x) && x != 58
}

pub fn valid_field_name(name: &str) -> bool
{
	!name.is_empty() && name.chars().all(is_field_name_char)
}

/// Normalises a field name to its canonical casing: each hyphenated
/// segment is capitalized, with the conventional all-caps exceptions
/// (`Message-ID`, `MIME-Version`, `Content-MD5`).
pub fn header_cased(name: &str) -> String
{
	let segments: Vec<String> = name
		.split('-')
		.map(|segment| match segment.to_ascii_lowercase().as_str()
		{
			"id" => "ID".to_string(),
			"mime" => "MIME".to_string(),
			"md5" => "MD5".to_string(),
			lower =>
			{
				let mut cased = String::with_capacity(lower.len());
				let mut chars = lower.chars();
				if let Some(first) = chars.next()
				{
					cased.extend(first.to_uppercase());
					cased.extend(chars);
				}
				cased
			}
		})
		.collect();
	segments.join("-")
}
