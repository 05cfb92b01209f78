// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed catalogs of filterable values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Which set-valued field of a filter a member belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// [`ContentType`] members.
    ContentTypes,
    /// [`Genre`] members.
    Genres,
    /// [`ReleaseStatus`] members.
    Status,
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ContentTypes => "content type",
            Self::Genres => "genre",
            Self::Status => "status",
        })
    }
}

/// Kind of media.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Feature films.
    Movie,
    /// Television series.
    Series,
    /// Anime, films and series alike.
    Anime,
}

impl ContentType {
    /// Every content type, in display order.
    pub const ALL: [Self; 3] = [Self::Movie, Self::Series, Self::Anime];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Series => "series",
            Self::Anime => "anime",
        }
    }

    /// Default (untranslated) label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Movie => "Movies",
            Self::Series => "TV Shows",
            Self::Anime => "Anime",
        }
    }
}

/// Genre.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    /// Action.
    Action,
    /// Comedy.
    Comedy,
    /// Drama.
    Drama,
    /// Fantasy.
    Fantasy,
    /// Horror.
    Horror,
    /// Romance.
    Romance,
    /// Science fiction.
    #[serde(rename = "Sci-Fi")]
    SciFi,
    /// Thriller.
    Thriller,
    /// Animation.
    Animation,
    /// Documentary.
    Documentary,
}

impl Genre {
    /// Every genre, in display order.
    pub const ALL: [Self; 10] = [
        Self::Action,
        Self::Comedy,
        Self::Drama,
        Self::Fantasy,
        Self::Horror,
        Self::Romance,
        Self::SciFi,
        Self::Thriller,
        Self::Animation,
        Self::Documentary,
    ];

    /// Stable identifier. Genres use their label as id.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Comedy => "Comedy",
            Self::Drama => "Drama",
            Self::Fantasy => "Fantasy",
            Self::Horror => "Horror",
            Self::Romance => "Romance",
            Self::SciFi => "Sci-Fi",
            Self::Thriller => "Thriller",
            Self::Animation => "Animation",
            Self::Documentary => "Documentary",
        }
    }

    /// Default (untranslated) label.
    pub const fn label(self) -> &'static str {
        self.id()
    }
}

/// Release status.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    /// Announced, not yet out.
    Upcoming,
    /// Out and complete.
    Released,
    /// Out and still airing.
    Ongoing,
}

impl ReleaseStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Upcoming, Self::Released, Self::Ongoing];

    /// Stable identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Released => "released",
            Self::Ongoing => "ongoing",
        }
    }

    /// Default (untranslated) label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::Released => "Released",
            Self::Ongoing => "Ongoing",
        }
    }
}

macro_rules! impl_catalog_str {
    ($ty:ty, $field:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.id())
            }
        }

        impl FromStr for $ty {
            type Err = FilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|member| member.id() == s)
                    .ok_or_else(|| FilterError::UnknownMember {
                        field: $field,
                        id: s.to_owned(),
                    })
            }
        }
    };
}

impl_catalog_str!(ContentType, FilterField::ContentTypes);
impl_catalog_str!(Genre, FilterField::Genres);
impl_catalog_str!(ReleaseStatus, FilterField::Status);

/// A single member of one of the set-valued filter fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Member {
    /// A content type.
    ContentType(ContentType),
    /// A genre.
    Genre(Genre),
    /// A release status.
    Status(ReleaseStatus),
}

impl Member {
    /// Look up `id` in the catalog of `field`.
    pub fn parse(field: FilterField, id: &str) -> Result<Self, FilterError> {
        Ok(match field {
            FilterField::ContentTypes => Self::ContentType(id.parse()?),
            FilterField::Genres => Self::Genre(id.parse()?),
            FilterField::Status => Self::Status(id.parse()?),
        })
    }

    /// Field this member belongs to.
    pub const fn field(self) -> FilterField {
        match self {
            Self::ContentType(_) => FilterField::ContentTypes,
            Self::Genre(_) => FilterField::Genres,
            Self::Status(_) => FilterField::Status,
        }
    }
}

impl From<ContentType> for Member {
    fn from(value: ContentType) -> Self {
        Self::ContentType(value)
    }
}

impl From<Genre> for Member {
    fn from(value: Genre) -> Self {
        Self::Genre(value)
    }
}

impl From<ReleaseStatus> for Member {
    fn from(value: ReleaseStatus) -> Self {
        Self::Status(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for ty in ContentType::ALL {
            assert_eq!(ty.id().parse::<ContentType>().ok(), Some(ty));
        }
        for genre in Genre::ALL {
            assert_eq!(genre.id().parse::<Genre>().ok(), Some(genre));
        }
        for status in ReleaseStatus::ALL {
            assert_eq!(status.id().parse::<ReleaseStatus>().ok(), Some(status));
        }
    }

    #[test]
    fn unknown_id_reports_field() {
        let err = Member::parse(FilterField::Genres, "Western").unwrap_err();
        assert_eq!(
            err,
            FilterError::UnknownMember {
                field: FilterField::Genres,
                id: "Western".into()
            }
        );
        assert_eq!(err.to_string(), "unknown genre id `Western`");
    }

    #[test]
    fn member_knows_its_field() {
        let m = Member::parse(FilterField::Status, "ongoing").unwrap();
        assert_eq!(m, Member::Status(ReleaseStatus::Ongoing));
        assert_eq!(m.field(), FilterField::Status);
        assert_eq!(Member::from(Genre::SciFi).field(), FilterField::Genres);
    }

    #[test]
    fn labels_differ_from_ids_where_expected() {
        assert_eq!(ContentType::Series.label(), "TV Shows");
        assert_eq!(Genre::SciFi.id(), "Sci-Fi");
        assert_eq!(ReleaseStatus::Upcoming.to_string(), "upcoming");
    }
}
