//! The two error surfaces: fatal [`ParseError`] (no `Url` is produced) and informational
//! [`SyntaxViolation`] (reported through a callback while parsing continues).
//!
//! Both are unit-only enums by design: an error that could carry a fragment of the input
//! would make it unsafe to log, and the standard's "report and continue" model requires that
//! discarding every `SyntaxViolation` still produce a byte-identical `Url`.

use core::fmt;

/// Why a parse failed outright. No variant carries the offending input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The input has no scheme and no base URL was supplied to resolve against.
    MissingSchemeNonRelativeUrl,
    /// The scheme prefix contains a byte that isn't ASCII alphanumeric, `+`, `-`, or `.`.
    InvalidScheme,
    /// A `[` that opens an IPv6 literal was never closed.
    UnclosedIpv6Address,
    /// The bracketed host is not a well-formed IPv6 address.
    InvalidIpv6Address,
    /// The dotted host "ends in a number" but is not a well-formed IPv4 address.
    InvalidIpv4Address,
    /// A host byte is forbidden in a non-special (opaque) host.
    HostForbiddenCodePoint,
    /// A host byte is forbidden in a special-scheme domain.
    DomainForbiddenCodePoint,
    /// IDNA `ToASCII` rejected the domain.
    DomainToAsciiFailure,
    /// IDNA `ToASCII` produced an empty domain from non-empty input.
    DomainToAsciiEmptyDomainFailure,
    /// A special-scheme URL's authority has an empty host.
    EmptyHostSpecialScheme,
    /// The port is syntactically a number but out of `u16` range.
    PortOutOfRange,
    /// The port range contains a non-digit byte.
    PortInvalid,
    /// Credentials (`user:pass@`) were given without a host to attach them to.
    CredentialsWithoutHost,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            ParseError::MissingSchemeNonRelativeUrl => {
                "relative URL without a base"
            }
            ParseError::InvalidScheme => "invalid scheme",
            ParseError::UnclosedIpv6Address => "unclosed IPv6 address",
            ParseError::InvalidIpv6Address => "invalid IPv6 address",
            ParseError::InvalidIpv4Address => "invalid IPv4 address",
            ParseError::HostForbiddenCodePoint => "forbidden code point in host",
            ParseError::DomainForbiddenCodePoint => "forbidden code point in domain",
            ParseError::DomainToAsciiFailure => "domain to ASCII conversion failed",
            ParseError::DomainToAsciiEmptyDomainFailure => {
                "domain to ASCII conversion produced an empty domain"
            }
            ParseError::EmptyHostSpecialScheme => "empty host for a special scheme",
            ParseError::PortOutOfRange => "port number out of range",
            ParseError::PortInvalid => "invalid port number",
            ParseError::CredentialsWithoutHost => "credentials without a host",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}

/// A non-fatal condition encountered while parsing. Reported through an optional callback;
/// discarding every report produces the same `Url` as reading none of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxViolation {
    /// A leading/trailing C0 control or space was trimmed from the input.
    C0ControlOrSpace,
    /// An ASCII tab or newline was stripped from the input.
    TabOrNewline,
    /// The scheme does not start with an ASCII alpha.
    InvalidSchemeStart,
    /// A `file:` URL's scheme was not immediately followed by a path separator.
    FileSchemeMissingFollowingSolidus,
    /// A relative-reference path did not begin with `/`.
    RelativeUrlMissingBeginningSolidus,
    /// A `\` was used where the standard expects `/` (tolerated only for special schemes).
    UnexpectedReverseSolidus,
    /// A special-scheme authority is missing its leading `//`.
    MissingSolidusBeforeAuthority,
    /// An unescaped `@` appears in an authority after credentials were already delimited.
    UnexpectedCommercialAt,
    /// Credentials were present with no accompanying host.
    UnexpectedCredentialsWithoutHost,
    /// A port was given with no accompanying host.
    UnexpectedPortWithoutHost,
    /// A host looks like a Windows drive letter (`file:` backtrack case).
    UnexpectedWindowsDriveLetterHost,
    /// A path segment looks like a Windows drive letter.
    UnexpectedWindowsDriveLetter,
    /// A byte outside the URL code point set appeared in path, query, or fragment.
    InvalidUrlCodePoint,
    /// A `%` was not followed by two hex digits.
    UnescapedPercentSign,
}

impl fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            SyntaxViolation::C0ControlOrSpace => "leading or trailing control or space character",
            SyntaxViolation::TabOrNewline => "tab or newline in URL",
            SyntaxViolation::InvalidSchemeStart => "scheme does not start with an ASCII letter",
            SyntaxViolation::FileSchemeMissingFollowingSolidus => {
                "file scheme not followed by a slash"
            }
            SyntaxViolation::RelativeUrlMissingBeginningSolidus => {
                "relative URL path does not start with a slash"
            }
            SyntaxViolation::UnexpectedReverseSolidus => "backslash used as a path separator",
            SyntaxViolation::MissingSolidusBeforeAuthority => "missing slashes before authority",
            SyntaxViolation::UnexpectedCommercialAt => "unexpected @ in authority",
            SyntaxViolation::UnexpectedCredentialsWithoutHost => "credentials without a host",
            SyntaxViolation::UnexpectedPortWithoutHost => "port without a host",
            SyntaxViolation::UnexpectedWindowsDriveLetterHost => "Windows drive letter as host",
            SyntaxViolation::UnexpectedWindowsDriveLetter => "Windows drive letter in path",
            SyntaxViolation::InvalidUrlCodePoint => "invalid URL code point",
            SyntaxViolation::UnescapedPercentSign => "unescaped % sign",
        };
        f.write_str(message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SyntaxViolation {}
