use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {facet} value '{value}'")]
pub struct UnknownFacetValue {
    pub facet: &'static str,
    pub value: String,
}

/// Declares a facet selector enum whose first variant is the `all` sentinel,
/// along with its token conversions.
macro_rules! facet {
    (
        $(#[$meta:meta])*
        $name:ident, $facet:literal {
            $($variant:ident => $token:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = "all")]
            All,
            $(
                #[serde(rename = $token)]
                $variant,
            )+
        }

        impl $name {
            pub const KEY: &'static str = $facet;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::All => "all",
                    $($name::$variant => $token,)+
                }
            }

            pub fn is_all(&self) -> bool {
                matches!(self, $name::All)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownFacetValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    "all" => Ok($name::All),
                    $($token => Ok($name::$variant),)+
                    other => Err(UnknownFacetValue {
                        facet: $facet,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

facet! {
    /// Monthly cost bracket
    BudgetFilter, "budget" {
        Budget => "budget",
        Mid => "mid",
        Premium => "premium",
        Luxury => "luxury",
    }
}

facet! {
    RegionFilter, "region" {
        Seoul => "seoul",
        Gyeonggi => "gyeonggi",
        Busan => "busan",
        Jeju => "jeju",
        Gangwon => "gangwon",
        Chungcheong => "chungcheong",
        Jeolla => "jeolla",
        Gyeongsang => "gyeongsang",
    }
}

facet! {
    EnvironmentFilter, "environment" {
        Urban => "urban",
        Suburb => "suburb",
        Nature => "nature",
        Beach => "beach",
        Mountain => "mountain",
    }
}

facet! {
    SeasonFilter, "season" {
        Spring => "spring",
        Summer => "summer",
        Fall => "fall",
        Winter => "winter",
    }
}

facet! {
    /// Single amenity requirement; only one can be active at a time.
    AmenityFilter, "amenity" {
        Coworking => "coworking",
        Cafe => "cafe",
        FastInternet => "fast-internet",
        HighEnvironment => "high-environment",
    }
}
