//! Closed enum domains, mirrored as PostgreSQL enum types
//!
//! Each domain is declared once here: the Rust enum is the source of truth,
//! and the schema DDL is generated from `ALL` and `DEFAULT`, so the store
//! and the application can never disagree about the domain or the default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A literal outside a declared enum domain.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {domain} value: '{value}'")]
pub struct InvalidEnumValue {
    pub domain: &'static str,
    pub value: String,
}

macro_rules! impl_enum_strings {
    ($ty:ident, $domain:literal, { $($variant:ident => $lit:literal),+ $(,)? }) => {
        impl $ty {
            /// Postgres type name for this domain.
            pub const TYPE_NAME: &'static str = $domain;

            /// Every member of the domain, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $lit),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($lit => Ok($ty::$variant),)+
                    other => Err(InvalidEnumValue {
                        domain: $domain,
                        value: other.to_owned(),
                    }),
                }
            }
        }
    };
}

/// Profile gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl_enum_strings!(Gender, "gender", {
    Male => "male",
    Female => "female",
    Other => "other",
});

/// Profile profession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "profession", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    Developer,
    Designer,
    Manager,
    Teacher,
    Unemployed,
    Other,
}

impl Profession {
    pub const DEFAULT: Profession = Profession::Developer;
}

impl_enum_strings!(Profession, "profession", {
    Developer => "developer",
    Designer => "designer",
    Manager => "manager",
    Teacher => "teacher",
    Unemployed => "unemployed",
    Other => "other",
});

/// Post publication status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "post_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub const DEFAULT: PostStatus = PostStatus::Published;
}

impl_enum_strings!(PostStatus, "post_status", {
    Draft => "draft",
    Published => "published",
    Archived => "archived",
});

/// Comment rating, five-point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "rating", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub const DEFAULT: Rating = Rating::Five;
}

impl_enum_strings!(Rating, "rating", {
    One => "one",
    Two => "two",
    Three => "three",
    Four => "four",
    Five => "five",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_variant() {
        for g in Gender::ALL {
            assert_eq!(g.as_str().parse::<Gender>().unwrap(), *g);
        }
        for p in Profession::ALL {
            assert_eq!(p.as_str().parse::<Profession>().unwrap(), *p);
        }
        for s in PostStatus::ALL {
            assert_eq!(s.as_str().parse::<PostStatus>().unwrap(), *s);
        }
        for r in Rating::ALL {
            assert_eq!(r.as_str().parse::<Rating>().unwrap(), *r);
        }
    }

    #[test]
    fn rejects_out_of_domain_literal() {
        let err = "seven".parse::<Rating>().unwrap_err();
        assert_eq!(
            err,
            InvalidEnumValue {
                domain: "rating",
                value: "seven".to_owned(),
            }
        );

        assert!("DRAFT".parse::<PostStatus>().is_err(), "case-sensitive");
        assert!("".parse::<Gender>().is_err());
    }

    #[test]
    fn defaults_are_in_domain() {
        assert!(Profession::ALL.contains(&Profession::DEFAULT));
        assert!(PostStatus::ALL.contains(&PostStatus::DEFAULT));
        assert!(Rating::ALL.contains(&Rating::DEFAULT));
    }

    #[test]
    fn serde_uses_lowercase_literals() {
        assert_eq!(
            serde_json::to_string(&PostStatus::Published).unwrap(),
            "\"published\""
        );
        let r: Rating = serde_json::from_str("\"five\"").unwrap();
        assert_eq!(r, Rating::Five);
    }

    #[test]
    fn ratings_are_ordered() {
        assert!(Rating::One < Rating::Five);
    }
}
