//! Keep-a-Changelog document model, parser and validator.
//!
//! A changelog lists version sections headed `## [vMAJOR.MINOR.PATCH]`,
//! newest first, optionally preceded by an `## [Unreleased]` section. Under
//! each version, change-kind subsections (`### Added`, `### Fixed`, ...)
//! hold non-empty bullet entries. Parsing is strict: header shape, version
//! ordering and entry content are all validated, and every violation is
//! reported with its line number.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod parser;

use parser::Header;

/// A semantic version, `MAJOR.MINOR.PATCH`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    /// Incremented for breaking changes
    pub major: u64,
    /// Incremented for additive changes
    pub minor: u64,
    /// Incremented for fixes
    pub patch: u64,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ChangelogError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        parser::version_string(input)
            .map(|(_, version)| version)
            .map_err(|_| ChangelogError::MalformedVersion(input.to_owned()))
    }
}

/// The kind of change a section records.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum ChangeKind {
    /// New features
    Added,
    /// Changes to existing functionality
    Changed,
    /// Features that will be removed
    Deprecated,
    /// Removed features
    Removed,
    /// Bug fixes
    Fixed,
    /// Vulnerability fixes
    Security,
}

/// A single bullet entry of a changelog section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// The entry text, with continuation lines joined
    pub text: String,
    /// The line the entry starts on
    pub line: usize,
}

/// All entries of one change kind under one version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    /// The kind of change the section records
    pub kind: ChangeKind,
    /// The line of the section header
    pub line: usize,
    /// The entries of the section, in document order
    pub entries: Vec<Entry>,
}

/// One released version of a changelog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Release {
    version: Version,
    line: usize,
    sections: Vec<Section>,
}

impl Release {
    /// The version this release describes.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The line of the version header.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The change sections of this release, in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The section of the given change kind, if present.
    pub fn section(&self, kind: ChangeKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// The entries of the given change kind.
    pub fn entries(&self, kind: ChangeKind) -> impl Iterator<Item = &Entry> {
        self.section(kind)
            .map(|section| section.entries.as_slice())
            .unwrap_or_default()
            .iter()
    }
}

/// A parsed and validated changelog document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changelog {
    unreleased: Option<Vec<Section>>,
    releases: Vec<Release>,
}

impl Changelog {
    /// Parse and validate a changelog document.
    ///
    /// # Errors
    /// Returns the first violation of the changelog convention, with the
    /// line it occurred on.
    pub fn parse(input: &str) -> Result<Self, ChangelogError> {
        let mut blocks: Vec<(Header, usize, Vec<Section>)> = Vec::new();
        let mut previous: Option<Version> = None;

        for (index, raw_line) in input.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw_line.trim_end();

            if let Some(header) = trimmed.strip_prefix("## ") {
                let header = parse_version_header(header, line)?;

                match header {
                    Header::Unreleased => {
                        if !blocks.is_empty() {
                            return Err(ChangelogError::MisplacedUnreleased { line });
                        }
                    }
                    Header::Released(version) => {
                        if let Some(previous) = previous {
                            if version == previous {
                                return Err(ChangelogError::DuplicateVersion { line, version });
                            }
                            if version > previous {
                                return Err(ChangelogError::VersionOrder {
                                    line,
                                    version,
                                    previous,
                                });
                            }
                        }
                        previous = Some(version);
                    }
                }

                blocks.push((header, line, Vec::new()));
                continue;
            }

            if let Some(kind) = trimmed.strip_prefix("### ") {
                let kind = ChangeKind::from_str(kind.trim()).map_err(|_| {
                    ChangelogError::UnknownChangeKind {
                        line,
                        kind: kind.trim().to_owned(),
                    }
                })?;

                let Some((header, _, sections)) = blocks.last_mut() else {
                    return Err(ChangelogError::SectionOutsideVersion { line, kind });
                };

                if sections.iter().any(|section| section.kind == kind) {
                    return Err(ChangelogError::DuplicateSection {
                        line,
                        kind,
                        version: match header {
                            Header::Unreleased => "[Unreleased]".to_owned(),
                            Header::Released(version) => format!("v{version}"),
                        },
                    });
                }

                sections.push(Section {
                    kind,
                    line,
                    entries: Vec::new(),
                });
                continue;
            }

            if let Some(text) = trimmed.strip_prefix('-') {
                let Some(section) = blocks
                    .last_mut()
                    .and_then(|(_, _, sections)| sections.last_mut())
                else {
                    return Err(ChangelogError::EntryOutsideSection { line });
                };

                let text = text.trim();
                if text.is_empty() {
                    return Err(ChangelogError::EmptyEntry { line });
                }

                section.entries.push(Entry {
                    text: text.to_owned(),
                    line,
                });
                continue;
            }

            // indented continuation lines extend the previous entry
            if raw_line.starts_with("  ") && !trimmed.trim().is_empty() {
                if let Some(entry) = blocks
                    .last_mut()
                    .and_then(|(_, _, sections)| sections.last_mut())
                    .and_then(|section| section.entries.last_mut())
                {
                    entry.text.push(' ');
                    entry.text.push_str(trimmed.trim());
                }
            }

            // titles, preamble prose, blank lines and link references are
            // not part of the validated structure
        }

        let mut unreleased = None;
        let mut releases = Vec::new();
        for (header, line, sections) in blocks {
            match header {
                Header::Unreleased => unreleased = Some(sections),
                Header::Released(version) => releases.push(Release {
                    version,
                    line,
                    sections,
                }),
            }
        }

        Ok(Self {
            unreleased,
            releases,
        })
    }

    /// The sections of the `[Unreleased]` block, if present.
    pub fn unreleased(&self) -> Option<&[Section]> {
        self.unreleased.as_deref()
    }

    /// The released versions, newest first.
    pub fn releases(&self) -> &[Release] {
        &self.releases
    }

    /// The release of the given version, if present.
    pub fn release(&self, version: Version) -> Option<&Release> {
        self.releases
            .iter()
            .find(|release| release.version == version)
    }

    /// The most recent release, if any.
    pub fn latest(&self) -> Option<&Release> {
        self.releases.first()
    }
}

fn parse_version_header(header: &str, line: usize) -> Result<Header, ChangelogError> {
    let malformed = || ChangelogError::MalformedVersionHeader {
        line,
        header: header.to_owned(),
    };

    let (rest, parsed) = parser::header(header).map_err(|_| malformed())?;

    // an optional release date may follow the bracketed version
    if !rest.is_empty() && !rest.starts_with(" - ") {
        return Err(malformed());
    }

    Ok(parsed)
}

/// Violations of the changelog convention, each reported with the line it
/// occurred on.
#[allow(variant_size_differences)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChangelogError {
    /// A string that is not a `MAJOR.MINOR.PATCH` triple
    #[error("malformed version \"{0}\"")]
    MalformedVersion(String),
    /// A version header that does not match the convention
    #[error(
        "line {line}: malformed version header \"{header}\" \
         (expected \"[vMAJOR.MINOR.PATCH]\" or \"[Unreleased]\")"
    )]
    MalformedVersionHeader {
        /// Line of the header
        line: usize,
        /// The offending header text
        header: String,
    },
    /// An `[Unreleased]` section after the first header
    #[error("line {line}: [Unreleased] must be the first section")]
    MisplacedUnreleased {
        /// Line of the header
        line: usize,
    },
    /// The same version listed twice
    #[error("line {line}: duplicate version {version}")]
    DuplicateVersion {
        /// Line of the header
        line: usize,
        /// The duplicated version
        version: Version,
    },
    /// Versions not listed newest first
    #[error("line {line}: versions must be listed newest first ({version} follows {previous})")]
    VersionOrder {
        /// Line of the header
        line: usize,
        /// The out-of-order version
        version: Version,
        /// The version listed above it
        previous: Version,
    },
    /// A change-kind header outside the Keep-a-Changelog vocabulary
    #[error("line {line}: unknown change kind \"{kind}\"")]
    UnknownChangeKind {
        /// Line of the header
        line: usize,
        /// The offending kind
        kind: String,
    },
    /// A change section before any version header
    #[error("line {line}: \"{kind}\" section appears before any version header")]
    SectionOutsideVersion {
        /// Line of the header
        line: usize,
        /// The kind of the misplaced section
        kind: ChangeKind,
    },
    /// The same change kind listed twice under one version
    #[error("line {line}: duplicate \"{kind}\" section for {version}")]
    DuplicateSection {
        /// Line of the header
        line: usize,
        /// The duplicated kind
        kind: ChangeKind,
        /// The version the section belongs to
        version: String,
    },
    /// A bullet with no content
    #[error("line {line}: empty changelog entry")]
    EmptyEntry {
        /// Line of the entry
        line: usize,
    },
    /// A bullet outside any change section
    #[error("line {line}: list entry appears outside a change section")]
    EntryOutsideSection {
        /// Line of the entry
        line: usize,
    },
}

#[cfg(test)]
mod test {
    use super::{ChangeKind, Changelog, ChangelogError, Version};

    const SAMPLE: &str = "\
# Changelog

All notable changes to this project will be documented in this file.

## [Unreleased]

### Added

- Transformer assemblies with partitioned stackups

## [v0.2.0]

### Added

- Stacked winding generator with via strips
- Changelog validation tooling

### Changed

- Resistance helpers now use SI units throughout

## [v0.1.2]

### Fixed

- Fix error in spiral DC resistance calculation
  reported for large thin single-turn windings

## [v0.1.0]

### Added

- Spiral winding generator
";

    #[test]
    fn entries_are_associated_with_their_version() {
        let changelog = Changelog::parse(SAMPLE).unwrap();

        let release = changelog
            .release(Version {
                major: 0,
                minor: 1,
                patch: 2,
            })
            .unwrap();
        let entries: Vec<_> = release.entries(ChangeKind::Fixed).collect();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].text,
            "Fix error in spiral DC resistance calculation \
             reported for large thin single-turn windings"
        );
    }

    #[test]
    fn releases_are_listed_newest_first() {
        let changelog = Changelog::parse(SAMPLE).unwrap();

        let versions: Vec<String> = changelog
            .releases()
            .iter()
            .map(|release| release.version().to_string())
            .collect();

        assert_eq!(versions, vec!["0.2.0", "0.1.2", "0.1.0"]);
        assert_eq!(changelog.latest().unwrap().version().to_string(), "0.2.0");
        assert!(changelog.unreleased().is_some());
    }

    #[test]
    fn out_of_order_versions_are_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n## [v0.2.0]\n");

        assert!(matches!(
            result,
            Err(ChangelogError::VersionOrder { line: 3, .. })
        ));
    }

    #[test]
    fn duplicate_versions_are_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n## [v0.1.0]\n");

        assert!(matches!(
            result,
            Err(ChangelogError::DuplicateVersion { line: 3, .. })
        ));
    }

    #[test]
    fn misplaced_unreleased_is_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n## [Unreleased]\n");

        assert!(matches!(
            result,
            Err(ChangelogError::MisplacedUnreleased { line: 3 })
        ));
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for header in ["## [0.1.0]", "## v0.1.0", "## [v0.1]", "## [v0.1.0] today"] {
            let result = Changelog::parse(header);

            assert!(
                matches!(result, Err(ChangelogError::MalformedVersionHeader { .. })),
                "{header} should be rejected"
            );
        }

        // a date suffix is part of the convention
        assert!(Changelog::parse("## [v0.1.0] - 2023-04-01\n").is_ok());
    }

    #[test]
    fn empty_entries_are_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n### Fixed\n\n-  \n");

        assert!(matches!(result, Err(ChangelogError::EmptyEntry { line: 5 })));
    }

    #[test]
    fn unknown_change_kinds_are_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n### Improved\n");

        assert!(matches!(
            result,
            Err(ChangelogError::UnknownChangeKind { line: 3, .. })
        ));
    }

    #[test]
    fn sections_require_a_version_header() {
        let result = Changelog::parse("### Fixed\n\n- something\n");

        assert!(matches!(
            result,
            Err(ChangelogError::SectionOutsideVersion { line: 1, .. })
        ));
    }

    #[test]
    fn duplicate_sections_are_rejected() {
        let result = Changelog::parse("## [v0.1.0]\n\n### Fixed\n\n- a fix\n\n### Fixed\n");

        assert!(matches!(
            result,
            Err(ChangelogError::DuplicateSection { line: 7, .. })
        ));
    }

    #[test]
    fn versions_order_semantically() {
        let small: Version = "v0.1.9".parse().unwrap();
        let large: Version = "v0.2.0".parse().unwrap();

        assert!(large > small);
        assert!("not-a-version".parse::<Version>().is_err());
    }
}
