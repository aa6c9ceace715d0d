//! Nom parsers for the changelog header syntax.

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete,
    combinator::{all_consuming, map, opt, value},
    sequence::{delimited, preceded, separated_pair},
    IResult,
};

use super::Version;

/// The payload of a `## ` version header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Header {
    /// The `[Unreleased]` section
    Unreleased,
    /// A released version, `[vMAJOR.MINOR.PATCH]`
    Released(Version),
}

/// Parse a dotted `MAJOR.MINOR.PATCH` triple.
pub(super) fn version(input: &str) -> IResult<&str, Version> {
    map(
        separated_pair(
            complete::u64,
            tag("."),
            separated_pair(complete::u64, tag("."), complete::u64),
        ),
        |(major, (minor, patch))| Version {
            major,
            minor,
            patch,
        },
    )(input)
}

/// Parse a version string with an optional leading `v`.
pub(super) fn version_string(input: &str) -> IResult<&str, Version> {
    all_consuming(preceded(opt(tag("v")), version))(input)
}

/// Parse the bracketed payload of a version header line.
pub(super) fn header(input: &str) -> IResult<&str, Header> {
    alt((
        value(Header::Unreleased, tag("[Unreleased]")),
        map(delimited(tag("[v"), version, tag("]")), Header::Released),
    ))(input)
}

#[cfg(test)]
mod test {
    use super::{header, version_string, Header};
    use crate::changelog::Version;

    #[test]
    fn versions_parse_with_and_without_prefix() {
        let expected = Version {
            major: 0,
            minor: 1,
            patch: 2,
        };

        assert_eq!(version_string("0.1.2").unwrap().1, expected);
        assert_eq!(version_string("v0.1.2").unwrap().1, expected);
        assert!(version_string("0.1").is_err());
        assert!(version_string("0.1.2.3").is_err());
    }

    #[test]
    fn headers_distinguish_released_and_unreleased() {
        assert_eq!(header("[Unreleased]").unwrap().1, Header::Unreleased);
        assert_eq!(
            header("[v1.2.3]").unwrap().1,
            Header::Released(Version {
                major: 1,
                minor: 2,
                patch: 3,
            })
        );
        assert!(header("[1.2.3]").is_err());
    }
}
